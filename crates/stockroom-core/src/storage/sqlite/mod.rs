//! SQLite storage backend.
//!
//! One connection is opened per session and held until `close`. Foreign keys
//! are enforced so deleting an item cascades to its transactions.

mod row;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{is_unique_violation, Result, StockError};
use crate::storage::traits::InventoryStore;
use crate::storage::types::{
    Item, NewItem, NewTransaction, RecordedTransaction, RequestContext, SearchField,
    TransactionFilter, TransactionKind, TransactionRecord,
};

use row::{ItemRow, TransactionRow, ITEM_COLUMNS};
use schema::{CREATE_SCHEMA, SCHEMA_VERSION};

/// SQLite-backed inventory store.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a private in-memory store (used by tests and dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StockError::Connection(format!("In-memory database: {}", e)))?;
        Self::from_connection(conn, None)
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StockError::Connection(format!("Enable foreign keys: {}", e)))?;

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| StockError::Connection(format!("Read schema version: {}", e)))?;
        if version > SCHEMA_VERSION {
            return Err(StockError::Connection(format!(
                "Database schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            )));
        }

        conn.execute_batch(CREATE_SCHEMA)
            .map_err(|e| StockError::Connection(format!("Initialize schema: {}", e)))?;
        conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION))
            .map_err(|e| StockError::Connection(format!("Write schema version: {}", e)))?;

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StockError::Connection("SQLite connection poisoned".to_string()))
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StockError::Validation("Item name is required".to_string()));
    }
    Ok(())
}

fn validate_new_item(item: &NewItem) -> Result<()> {
    validate_name(&item.name)?;
    if item.quantity < 0 {
        return Err(StockError::Validation(
            "Quantity cannot be negative".to_string(),
        ));
    }
    if item.unit_price.is_some_and(|price| price < Decimal::ZERO) {
        return Err(StockError::Validation(
            "Unit price cannot be negative".to_string(),
        ));
    }
    if item.minimum_stock < 0 {
        return Err(StockError::Validation(
            "Minimum stock cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Column matched by each search field. Only these fixed names reach the SQL text.
fn search_column(field: SearchField) -> &'static str {
    match field {
        SearchField::Name => "name",
        SearchField::Category => "category",
        SearchField::Supplier => "supplier",
        SearchField::Barcode => "barcode",
    }
}

/// Build a `LIKE` pattern matching `term` anywhere, with wildcards in the term escaped.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn collect_items(stmt: &mut rusqlite::Statement<'_>, params: impl rusqlite::Params) -> Result<Vec<Item>> {
    let rows = stmt.query_map(params, ItemRow::from_row)?;
    let mut items = Vec::new();
    for row in rows {
        items.push(row?.try_into()?);
    }
    Ok(items)
}

impl InventoryStore for SqliteStore {
    fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening inventory database");
        let conn = Connection::open(path).map_err(|e| {
            StockError::Connection(format!("Cannot open {}: {}", path.display(), e))
        })?;
        let store = Self::from_connection(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "inventory database ready");
        Ok(store)
    }

    fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| StockError::Connection("SQLite connection poisoned".to_string()))?;
        conn.close().map_err(|(_, e)| StockError::from(e))?;
        debug!("inventory database closed");
        Ok(())
    }

    fn create_item(&mut self, item: &NewItem) -> Result<i64> {
        validate_new_item(item)?;
        let conn = self.lock_conn()?;

        let inserted = conn.execute(
            r#"
            INSERT INTO items (
                name,
                category,
                quantity,
                unit_price,
                supplier,
                supplier_contact,
                date_added,
                minimum_stock,
                barcode,
                location
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                &item.name,
                &item.category,
                item.quantity,
                item.unit_price.map(|price| price.to_string()),
                &item.supplier,
                &item.supplier_contact,
                now_timestamp(),
                item.minimum_stock,
                &item.barcode,
                &item.location,
            ),
        );

        match inserted {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                info!(item_id = id, name = %item.name, "item added");
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => {
                warn!(name = %item.name, "rejected duplicate item name");
                Err(StockError::DuplicateName(item.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let conn = self.lock_conn()?;

        let row = conn
            .query_row(
                &format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS),
                [id],
                ItemRow::from_row,
            )
            .optional()?;

        row.map(Item::try_from).transpose()
    }

    fn list_items(&self) -> Result<Vec<Item>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM items ORDER BY id", ITEM_COLUMNS))?;
        collect_items(&mut stmt, [])
    }

    fn update_item(&mut self, id: i64, item: &NewItem) -> Result<bool> {
        validate_name(&item.name)?;
        let conn = self.lock_conn()?;

        let updated = conn.execute(
            r#"
            UPDATE items SET
                name = ?,
                category = ?,
                quantity = ?,
                unit_price = ?,
                supplier = ?,
                supplier_contact = ?,
                minimum_stock = ?,
                barcode = ?,
                location = ?
            WHERE id = ?
            "#,
            (
                &item.name,
                &item.category,
                item.quantity,
                item.unit_price.map(|price| price.to_string()),
                &item.supplier,
                &item.supplier_contact,
                item.minimum_stock,
                &item.barcode,
                &item.location,
                id,
            ),
        );

        match updated {
            Ok(0) => {
                warn!(item_id = id, "update matched no item");
                Ok(false)
            }
            Ok(_) => {
                info!(item_id = id, "item updated");
                Ok(true)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(StockError::DuplicateName(item.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_item(&mut self, id: i64) -> Result<bool> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row("SELECT id FROM items WHERE id = ?", [id], |row| row.get(0))
            .optional()?;
        if exists.is_none() {
            warn!(item_id = id, "delete matched no item");
            return Ok(false);
        }

        // The foreign key cascades as well; deleting explicitly keeps the
        // behavior independent of the foreign_keys pragma.
        let removed = tx.execute("DELETE FROM transactions WHERE item_id = ?", [id])?;
        tx.execute("DELETE FROM items WHERE id = ?", [id])?;

        tx.commit()?;
        info!(item_id = id, transactions_removed = removed, "item deleted");
        Ok(true)
    }

    fn search_items(&self, term: &str, field: SearchField) -> Result<Vec<Item>> {
        let conn = self.lock_conn()?;
        let query = format!(
            "SELECT {} FROM items WHERE {} LIKE ? ESCAPE '\\' ORDER BY id",
            ITEM_COLUMNS,
            search_column(field)
        );
        let mut stmt = conn.prepare(&query)?;
        let items = collect_items(&mut stmt, [contains_pattern(term)])?;
        debug!(%field, matches = items.len(), "item search");
        Ok(items)
    }

    fn record_transaction(
        &mut self,
        ctx: &RequestContext,
        transaction: &NewTransaction,
    ) -> Result<RecordedTransaction> {
        if transaction.quantity <= 0 {
            return Err(StockError::Validation(
                "Transaction quantity must be greater than zero".to_string(),
            ));
        }

        let mut conn = self.lock_conn()?;
        // IMMEDIATE takes the write lock before the stock check, so two
        // sessions cannot both pass the check against the same quantity.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: i64 = tx
            .query_row(
                "SELECT quantity FROM items WHERE id = ?",
                [transaction.item_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| {
                StockError::NotFound(format!("Item {} not found", transaction.item_id))
            })?;

        if transaction.kind == TransactionKind::Out && transaction.quantity > current {
            warn!(
                item_id = transaction.item_id,
                requested = transaction.quantity,
                available = current,
                "insufficient stock"
            );
            return Err(StockError::InsufficientStock {
                item_id: transaction.item_id,
                requested: transaction.quantity,
                available: current,
            });
        }

        let new_quantity = transaction
            .kind
            .apply(current, transaction.quantity)
            .ok_or_else(|| StockError::Validation("Resulting quantity overflows".to_string()))?;

        tx.execute(
            "UPDATE items SET quantity = ? WHERE id = ?",
            (new_quantity, transaction.item_id),
        )?;

        tx.execute(
            r#"
            INSERT INTO transactions (
                item_id,
                transaction_type,
                quantity,
                transaction_date,
                notes,
                user_name
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                transaction.item_id,
                transaction.kind.as_str(),
                transaction.quantity,
                now_timestamp(),
                &transaction.notes,
                &ctx.user,
            ),
        )?;
        let transaction_id = tx.last_insert_rowid();

        tx.commit()?;

        info!(
            transaction_id,
            item_id = transaction.item_id,
            kind = %transaction.kind,
            quantity = transaction.quantity,
            user = %ctx.user,
            "transaction recorded"
        );

        Ok(RecordedTransaction {
            transaction_id,
            item_id: transaction.item_id,
            kind: transaction.kind,
            previous_quantity: current,
            new_quantity,
        })
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionRecord>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(item_id) = filter.item_id {
            conditions.push("t.item_id = ?");
            params.push(Box::new(item_id));
        }

        if let Some(kind) = filter.kind {
            conditions.push("t.transaction_type = ?");
            params.push(Box::new(kind.as_str()));
        }

        let mut query = String::from(
            "SELECT t.id, t.item_id, i.name, t.transaction_type, t.quantity, t.transaction_date, t.notes, t.user_name \
             FROM transactions t JOIN items i ON t.item_id = i.id",
        );
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY t.transaction_date DESC, t.id DESC");

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            TransactionRow::from_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.try_into()?);
        }

        Ok(records)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(StockError::Query(format!(
                "Integrity check failed: {}",
                status
            )));
        }

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(StockError::Query(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        Ok(())
    }

    fn backup_to(&self, destination: &Path) -> Result<()> {
        if destination.exists() {
            return Err(StockError::Validation(format!(
                "Backup destination already exists: {}",
                destination.display()
            )));
        }
        let target = destination.to_str().ok_or_else(|| {
            StockError::Validation("Backup destination must be valid UTF-8".to_string())
        })?;

        let conn = self.lock_conn()?;
        conn.execute("VACUUM INTO ?", [target])?;
        info!(destination = %destination.display(), "database backed up");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("bolt"), "%bolt%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn test_search_columns_are_fixed() {
        for field in SearchField::ALL {
            assert_eq!(search_column(field), field.as_str());
        }
    }

    #[test]
    fn test_reopen_in_memory_schema_is_idempotent() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.lock_conn().unwrap();
        conn.execute_batch(CREATE_SCHEMA).unwrap();
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_validation_rejects_negative_fields() {
        assert!(validate_new_item(&NewItem::new("Widget").with_quantity(-1)).is_err());
        assert!(validate_new_item(&NewItem::new("Widget").with_minimum_stock(-1)).is_err());
        assert!(
            validate_new_item(&NewItem::new("Widget").with_unit_price(Decimal::new(-1, 2)))
                .is_err()
        );
        assert!(validate_new_item(&NewItem::new("   ")).is_err());
        assert!(validate_new_item(&NewItem::new("Widget")).is_ok());
    }

    #[test]
    fn test_failed_out_rolls_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .create_item(&NewItem::new("Widget").with_quantity(2))
            .unwrap();
        let err = store
            .record_transaction(
                &RequestContext::default(),
                &NewTransaction::new(id, TransactionKind::Out, 3),
            )
            .unwrap_err();
        assert!(matches!(err, StockError::InsufficientStock { .. }));

        // The connection is usable again: the dropped transaction rolled back.
        let recorded = store
            .record_transaction(
                &RequestContext::default(),
                &NewTransaction::new(id, TransactionKind::In, 1),
            )
            .unwrap();
        assert_eq!(recorded.new_quantity, 3);
    }
}
