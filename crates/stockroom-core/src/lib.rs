//! # Stockroom Core
//!
//! Core library for Stockroom - a single-tenant inventory tracker.
//!
//! This crate provides the data model, the storage abstraction and its SQLite
//! implementation, and report aggregation, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: `InventoryStore` trait, item/transaction types, SQLite backend
//! - **report**: dashboard totals, low stock, stock value and breakdown reports
//! - **error**: the `StockError` taxonomy shared by every operation

pub mod error;
pub mod report;
pub mod storage;

pub use error::{Result, StockError};
pub use storage::InventoryStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
