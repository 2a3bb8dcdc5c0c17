//! Core data types for the storage layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StockError;

/// Name recorded when no user is supplied for a session.
pub const DEFAULT_USER: &str = "Guest";

/// A tracked stock-keeping unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Auto-assigned identifier
    pub id: i64,

    /// Unique display name
    pub name: String,

    pub category: Option<String>,

    /// Units on hand
    pub quantity: i64,

    pub unit_price: Option<Decimal>,

    pub supplier: Option<String>,

    pub supplier_contact: Option<String>,

    /// When the item was first added (assigned by the store)
    pub date_added: DateTime<Utc>,

    /// Threshold at or below which the item counts as low stock
    pub minimum_stock: i64,

    pub barcode: Option<String>,

    /// Storage location (shelf, bin, room)
    pub location: Option<String>,
}

impl Item {
    /// Whether the quantity on hand is at or below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_stock
    }

    /// Quantity multiplied by unit price, or `None` for unpriced items.
    ///
    /// # Errors
    ///
    /// Returns `StockError::Validation` when the product does not fit in a
    /// `Decimal`.
    pub fn checked_stock_value(&self) -> Result<Option<Decimal>, StockError> {
        self.unit_price
            .map(|price| {
                price.checked_mul(Decimal::from(self.quantity)).ok_or_else(|| {
                    StockError::Validation(format!(
                        "stock value of '{}' is too large to compute",
                        self.name
                    ))
                })
            })
            .transpose()
    }

    /// Display form of [`Item::checked_stock_value`]; `None` when unpriced or
    /// out of range.
    pub fn stock_value(&self) -> Option<Decimal> {
        self.checked_stock_value().ok().flatten()
    }
}

/// Full attribute set for creating or replacing an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub minimum_stock: i64,
    pub barcode: Option<String>,
    pub location: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_supplier_contact(mut self, contact: impl Into<String>) -> Self {
        self.supplier_contact = Some(contact.into());
        self
    }

    pub fn with_minimum_stock(mut self, minimum: i64) -> Self {
        self.minimum_stock = minimum;
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl From<&Item> for NewItem {
    /// Pre-populate a replacement from an existing item.
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            supplier: item.supplier.clone(),
            supplier_contact: item.supplier_contact.clone(),
            minimum_stock: item.minimum_stock,
            barcode: item.barcode.clone(),
            location: item.location.clone(),
        }
    }
}

/// The effect a transaction has on an item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Adds to the quantity on hand
    In,
    /// Subtracts from the quantity on hand; guarded against overdraw
    Out,
    /// Sets the quantity on hand to an absolute value
    Adjustment,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::In,
        TransactionKind::Out,
        TransactionKind::Adjustment,
    ];

    /// Value stored in the `transaction_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Adjustment => "ADJUSTMENT",
        }
    }

    /// Quantity after applying `amount` of this kind to `current`.
    ///
    /// Returns `None` on integer overflow.
    pub fn apply(&self, current: i64, amount: i64) -> Option<i64> {
        match self {
            Self::In => current.checked_add(amount),
            Self::Out => current.checked_sub(amount),
            Self::Adjustment => Some(amount),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "ADJUSTMENT" | "ADJUST" => Ok(Self::Adjustment),
            other => Err(StockError::Validation(format!(
                "Unknown transaction type: {} (use IN, OUT or ADJUSTMENT)",
                other
            ))),
        }
    }
}

/// A request to change one item's quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub item_id: i64,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(item_id: i64, kind: TransactionKind, quantity: i64) -> Self {
        Self {
            item_id,
            kind,
            quantity,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Outcome of a successfully recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedTransaction {
    pub transaction_id: i64,
    pub item_id: i64,
    pub kind: TransactionKind,
    pub previous_quantity: i64,
    pub new_quantity: i64,
}

/// A transaction row joined with its item's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub item_id: i64,
    pub item_name: String,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub user: Option<String>,
}

/// Filter for querying transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions against this item
    pub item_id: Option<i64>,

    /// Only transactions of this kind
    pub kind: Option<TransactionKind>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item_id: i64) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Columns an item search may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Name,
    Category,
    Supplier,
    Barcode,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Category,
        SearchField::Supplier,
        SearchField::Barcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Supplier => "supplier",
            Self::Barcode => "barcode",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "supplier" => Ok(Self::Supplier),
            "barcode" => Ok(Self::Barcode),
            other => Err(StockError::Validation(format!(
                "Unknown search field: {} (use name, category, supplier or barcode)",
                other
            ))),
        }
    }
}

/// Who is acting in the current session.
///
/// Passed explicitly into operations that record an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user: String,
}

impl RequestContext {
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        if user.trim().is_empty() {
            return Self::default();
        }
        Self { user }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(quantity: i64, minimum_stock: i64, price: Option<Decimal>) -> Item {
        Item {
            id: 1,
            name: "Widget".to_string(),
            category: None,
            quantity,
            unit_price: price,
            supplier: None,
            supplier_contact: None,
            date_added: Utc::now(),
            minimum_stock,
            barcode: None,
            location: None,
        }
    }

    #[test]
    fn test_new_item_builder() {
        let item = NewItem::new("Widget")
            .with_category("Hardware")
            .with_quantity(10)
            .with_unit_price(Decimal::new(250, 2))
            .with_minimum_stock(5);

        assert_eq!(item.name, "Widget");
        assert_eq!(item.category.as_deref(), Some("Hardware"));
        assert_eq!(item.quantity, 10);
        assert_eq!(item.unit_price, Some(Decimal::new(25, 1)));
        assert_eq!(item.minimum_stock, 5);
        assert!(item.supplier.is_none());
    }

    #[test]
    fn test_kind_apply() {
        assert_eq!(TransactionKind::In.apply(10, 3), Some(13));
        assert_eq!(TransactionKind::Out.apply(10, 3), Some(7));
        assert_eq!(TransactionKind::Adjustment.apply(10, 3), Some(3));
        assert_eq!(TransactionKind::In.apply(i64::MAX, 1), None);
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("in".parse::<TransactionKind>().unwrap(), TransactionKind::In);
        assert_eq!(" Out ".parse::<TransactionKind>().unwrap(), TransactionKind::Out);
        assert_eq!(
            "adjustment".parse::<TransactionKind>().unwrap(),
            TransactionKind::Adjustment
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_uppercase() {
        let value = serde_json::to_value(TransactionKind::Adjustment).unwrap();
        assert_eq!(value, serde_json::json!("ADJUSTMENT"));
    }

    #[test]
    fn test_search_field_parse() {
        assert_eq!("Barcode".parse::<SearchField>().unwrap(), SearchField::Barcode);
        assert!("name; DROP TABLE items".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_low_stock_includes_threshold() {
        assert!(sample_item(5, 5, None).is_low_stock());
        assert!(sample_item(0, 0, None).is_low_stock());
        assert!(!sample_item(6, 5, None).is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        let item = sample_item(4, 0, Some(Decimal::new(250, 2)));
        assert_eq!(item.stock_value(), Some(Decimal::new(10, 0)));
        assert_eq!(sample_item(4, 0, None).stock_value(), None);
    }

    #[test]
    fn test_stock_value_overflow() {
        let item = sample_item(i64::MAX, 0, Some(Decimal::MAX));
        assert!(matches!(
            item.checked_stock_value(),
            Err(StockError::Validation(_))
        ));
        assert_eq!(item.stock_value(), None);
    }

    #[test]
    fn test_request_context_defaults_blank_user() {
        assert_eq!(RequestContext::new("  ").user, DEFAULT_USER);
        assert_eq!(RequestContext::new("ana").user, "ana");
    }

    #[test]
    fn test_transaction_filter_builder() {
        let filter = TransactionFilter::new()
            .item(3)
            .kind(TransactionKind::Out)
            .limit(10);

        assert_eq!(filter.item_id, Some(3));
        assert_eq!(filter.kind, Some(TransactionKind::Out));
        assert_eq!(filter.limit, Some(10));
    }
}
