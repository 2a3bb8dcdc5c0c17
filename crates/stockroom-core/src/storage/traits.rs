//! Inventory store trait definition.
//!
//! The `InventoryStore` trait defines the interface every storage backend
//! implements. The CLI only talks to this trait, so a different backend can be
//! introduced without touching the presentation layer.

use std::path::Path;

use super::types::{
    Item, NewItem, NewTransaction, RecordedTransaction, RequestContext, SearchField,
    TransactionFilter, TransactionRecord,
};
use crate::error::Result;

/// Storage interface for items and their transactions.
///
/// All implementations must ensure:
/// - Item names are unique
/// - Transactions are append-only and always reference an existing item
/// - Recording a transaction updates the item and appends the row atomically
pub trait InventoryStore: Send + Sync {
    /// Open (creating if needed) the store at `path`.
    ///
    /// The schema is created idempotently.
    ///
    /// # Errors
    ///
    /// Returns `StockError::Connection` if the database cannot be opened or
    /// the schema cannot be initialized.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Close the store, releasing its connection.
    fn close(self) -> Result<()>;

    // --- Item operations ---

    /// Insert a new item.
    ///
    /// # Returns
    ///
    /// Returns the id assigned to the item.
    ///
    /// # Errors
    ///
    /// Returns `StockError::Validation` if the name is empty or a quantity,
    /// price or minimum is negative, and `StockError::DuplicateName` if an
    /// item with the same name already exists.
    fn create_item(&mut self, item: &NewItem) -> Result<i64>;

    /// Get an item by id.
    ///
    /// Returns `Ok(None)` if no item has that id.
    fn get_item(&self, id: i64) -> Result<Option<Item>>;

    /// List every item, ordered by id.
    fn list_items(&self) -> Result<Vec<Item>>;

    /// Replace every mutable field of an item.
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` if no item has that id (nothing was written).
    fn update_item(&mut self, id: i64, item: &NewItem) -> Result<bool>;

    /// Delete an item together with all of its transactions.
    ///
    /// # Returns
    ///
    /// Returns `Ok(false)` if no item had that id.
    fn delete_item(&mut self, id: i64) -> Result<bool>;

    /// Search items whose `field` contains `term` (case-insensitive).
    fn search_items(&self, term: &str, field: SearchField) -> Result<Vec<Item>>;

    // --- Transaction operations ---

    /// Apply a transaction to its item and append it to the log.
    ///
    /// # Errors
    ///
    /// - `StockError::Validation` if the quantity is not positive
    /// - `StockError::NotFound` if the item does not exist
    /// - `StockError::InsufficientStock` if an OUT exceeds the quantity on hand
    ///
    /// On error neither the item nor the log is changed.
    fn record_transaction(
        &mut self,
        ctx: &RequestContext,
        transaction: &NewTransaction,
    ) -> Result<RecordedTransaction>;

    /// List transactions matching the filter, newest first.
    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionRecord>>;

    // --- Maintenance operations ---

    /// Check database integrity and foreign key consistency.
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent copy of the database to `destination`.
    fn backup_to(&self, destination: &Path) -> Result<()>;
}
