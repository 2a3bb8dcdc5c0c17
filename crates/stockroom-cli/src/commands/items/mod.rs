pub mod add;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use add::handle_add;
pub use delete::handle_delete;
pub use list::handle_list;
pub use show::handle_show;
pub use update::handle_update;
