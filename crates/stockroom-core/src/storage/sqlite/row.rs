//! Raw row types for database queries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{Result, StockError};
use crate::storage::types::{Item, TransactionKind, TransactionRecord};

/// Column list matching `ItemRow::from_row`.
pub const ITEM_COLUMNS: &str = "id, name, category, quantity, unit_price, supplier, \
     supplier_contact, date_added, minimum_stock, barcode, location";

/// Raw row data from the items table, before parsing into domain types.
#[derive(Debug)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<String>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub date_added: String,
    pub minimum_stock: i64,
    pub barcode: Option<String>,
    pub location: Option<String>,
}

impl ItemRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            quantity: row.get(3)?,
            unit_price: row.get(4)?,
            supplier: row.get(5)?,
            supplier_contact: row.get(6)?,
            date_added: row.get(7)?,
            minimum_stock: row.get(8)?,
            barcode: row.get(9)?,
            location: row.get(10)?,
        })
    }
}

impl TryFrom<ItemRow> for Item {
    type Error = StockError;

    fn try_from(row: ItemRow) -> Result<Self> {
        let date_added = parse_timestamp(&row.date_added)?;
        let unit_price = row
            .unit_price
            .as_deref()
            .map(|value| {
                Decimal::from_str(value)
                    .map_err(|e| StockError::Query(format!("Invalid unit price {}: {}", value, e)))
            })
            .transpose()?;

        Ok(Item {
            id: row.id,
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            unit_price,
            supplier: row.supplier,
            supplier_contact: row.supplier_contact,
            date_added,
            minimum_stock: row.minimum_stock,
            barcode: row.barcode,
            location: row.location,
        })
    }
}

/// Raw row data from the transactions/items join.
#[derive(Debug)]
pub struct TransactionRow {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub transaction_type: String,
    pub quantity: i64,
    pub transaction_date: String,
    pub notes: Option<String>,
    pub user: Option<String>,
}

impl TransactionRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            item_id: row.get(1)?,
            item_name: row.get(2)?,
            transaction_type: row.get(3)?,
            quantity: row.get(4)?,
            transaction_date: row.get(5)?,
            notes: row.get(6)?,
            user: row.get(7)?,
        })
    }
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = StockError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let kind = TransactionKind::from_str(&row.transaction_type)
            .map_err(|e| StockError::Query(format!("Invalid transaction row {}: {}", row.id, e)))?;
        let created_at = parse_timestamp(&row.transaction_date)?;

        Ok(TransactionRecord {
            id: row.id,
            item_id: row.item_id,
            item_name: row.item_name,
            kind,
            quantity: row.quantity,
            created_at,
            notes: row.notes,
            user: row.user,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| StockError::Query(format!("Invalid timestamp {}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_row() -> ItemRow {
        ItemRow {
            id: 7,
            name: "Widget".to_string(),
            category: Some("Hardware".to_string()),
            quantity: 10,
            unit_price: Some("2.50".to_string()),
            supplier: None,
            supplier_contact: None,
            date_added: "2024-03-01T12:00:00.000000Z".to_string(),
            minimum_stock: 5,
            barcode: None,
            location: None,
        }
    }

    #[test]
    fn test_item_row_converts() {
        let item: Item = item_row().try_into().unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.unit_price, Some(Decimal::new(250, 2)));
        assert_eq!(item.date_added.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_item_row_rejects_bad_price() {
        let mut row = item_row();
        row.unit_price = Some("two fifty".to_string());
        let result: Result<Item> = row.try_into();
        assert!(matches!(result, Err(StockError::Query(_))));
    }

    #[test]
    fn test_transaction_row_rejects_unknown_kind() {
        let row = TransactionRow {
            id: 1,
            item_id: 7,
            item_name: "Widget".to_string(),
            transaction_type: "TRANSFER".to_string(),
            quantity: 1,
            transaction_date: "2024-03-01T12:00:00Z".to_string(),
            notes: None,
            user: None,
        };
        let result: Result<TransactionRecord> = row.try_into();
        assert!(result.is_err());
    }
}
