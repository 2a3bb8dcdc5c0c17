//! Storage abstraction for Stockroom.
//!
//! This module defines the `InventoryStore` trait and the item and
//! transaction types that flow through it.
//!
//! ## Architecture
//!
//! The storage layer is backend-agnostic; the CLI depends only on the trait.
//! The shipped backend is a single SQLite file opened for the lifetime of a
//! session (`SqliteStore`).

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::SqliteStore;
pub use traits::InventoryStore;
pub use types::{
    Item, NewItem, NewTransaction, RecordedTransaction, RequestContext, SearchField,
    TransactionFilter, TransactionKind, TransactionRecord, DEFAULT_USER,
};
