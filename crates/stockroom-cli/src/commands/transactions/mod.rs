pub mod history;
pub mod record;

pub use history::handle_history;
pub use record::handle_record;
