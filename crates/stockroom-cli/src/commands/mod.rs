pub mod dashboard;
pub mod init;
pub mod items;
pub mod low_stock;
pub mod maintenance;
pub mod menu;
pub mod misc;
pub mod reports;
pub mod search;
pub mod transactions;
