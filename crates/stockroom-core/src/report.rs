//! Report aggregation.
//!
//! Every report is a pure function over rows already fetched from the store,
//! so the CLI decides how much to fetch and how to render the result.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, StockError};
use crate::storage::types::{Item, TransactionKind, TransactionRecord};

/// Category label for items without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub low_stock_items: usize,
    /// Sum of quantity × unit price over priced items
    pub total_value: Decimal,
}

/// One line of the stock value report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockValueRow {
    pub item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
}

/// Total quantity moved by one transaction kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindTotal {
    pub kind: TransactionKind,
    pub transactions: usize,
    pub quantity: i64,
}

/// Total quantity on hand in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub items: usize,
    pub quantity: i64,
}

/// Quantity moved per day and kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub quantity: i64,
}

pub fn dashboard(items: &[Item]) -> Result<DashboardSummary> {
    let mut total_value = Decimal::ZERO;
    for item in items {
        if let Some(value) = item.checked_stock_value()? {
            total_value = total_value
                .checked_add(value)
                .ok_or_else(|| overflow("total inventory value"))?;
        }
    }

    Ok(DashboardSummary {
        total_items: items.len(),
        low_stock_items: items.iter().filter(|item| item.is_low_stock()).count(),
        total_value,
    })
}

/// Items at or below their minimum stock, in input order.
pub fn low_stock(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|item| item.is_low_stock()).collect()
}

pub fn stock_value(items: &[Item]) -> Result<Vec<StockValueRow>> {
    items
        .iter()
        .map(|item| {
            Ok(StockValueRow {
                item_id: item.id,
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_value: item.checked_stock_value()?,
            })
        })
        .collect()
}

/// Per-kind totals, in IN, OUT, ADJUSTMENT order. Kinds with no
/// transactions are omitted.
pub fn transaction_summary(records: &[TransactionRecord]) -> Result<Vec<KindTotal>> {
    let mut totals: BTreeMap<TransactionKind, (usize, i64)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.kind).or_default();
        entry.0 += 1;
        entry.1 = add_quantity(entry.1, record.quantity, record.kind.as_str())?;
    }

    Ok(totals
        .into_iter()
        .map(|(kind, (transactions, quantity))| KindTotal {
            kind,
            transactions,
            quantity,
        })
        .collect())
}

/// Quantity on hand per category, sorted by category name.
pub fn category_breakdown(items: &[Item]) -> Result<Vec<CategoryTotal>> {
    let mut totals: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for item in items {
        let category = item
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let entry = totals.entry(category).or_default();
        entry.0 += 1;
        entry.1 = add_quantity(entry.1, item.quantity, category)?;
    }

    Ok(totals
        .into_iter()
        .map(|(category, (items, quantity))| CategoryTotal {
            category: category.to_string(),
            items,
            quantity,
        })
        .collect())
}

/// Quantity per UTC day and kind, oldest day first.
pub fn daily_activity(records: &[TransactionRecord]) -> Result<Vec<DailyActivity>> {
    let mut totals: BTreeMap<(NaiveDate, TransactionKind), i64> = BTreeMap::new();
    for record in records {
        let date = record.created_at.date_naive();
        let total = totals.entry((date, record.kind)).or_default();
        *total = add_quantity(*total, record.quantity, &date.to_string())?;
    }

    Ok(totals
        .into_iter()
        .map(|((date, kind), quantity)| DailyActivity {
            date,
            kind,
            quantity,
        })
        .collect())
}

fn add_quantity(total: i64, quantity: i64, group: &str) -> Result<i64> {
    total
        .checked_add(quantity)
        .ok_or_else(|| overflow(&format!("quantity total for {}", group)))
}

fn overflow(what: &str) -> StockError {
    StockError::Validation(format!("{} is too large to compute", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: i64, category: Option<&str>, quantity: i64, minimum: i64, price: Option<i64>) -> Item {
        Item {
            id,
            name: format!("item-{}", id),
            category: category.map(str::to_string),
            quantity,
            unit_price: price.map(|cents| Decimal::new(cents, 2)),
            supplier: None,
            supplier_contact: None,
            date_added: Utc::now(),
            minimum_stock: minimum,
            barcode: None,
            location: None,
        }
    }

    fn record(id: i64, kind: TransactionKind, quantity: i64, day: u32) -> TransactionRecord {
        TransactionRecord {
            id,
            item_id: 1,
            item_name: "item-1".to_string(),
            kind,
            quantity,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap(),
            notes: None,
            user: Some("Guest".to_string()),
        }
    }

    #[test]
    fn test_dashboard_totals() {
        let items = vec![
            item(1, Some("Hardware"), 7, 5, Some(250)),
            item(2, None, 2, 5, None),
            item(3, Some("Paint"), 10, 0, Some(100)),
        ];
        let summary = dashboard(&items).unwrap();

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock_items, 1);
        assert_eq!(summary.total_value, Decimal::new(2750, 2));
    }

    #[test]
    fn test_dashboard_empty() {
        let summary = dashboard(&[]).unwrap();
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_low_stock_keeps_order() {
        let items = vec![
            item(1, None, 5, 5, None),
            item(2, None, 6, 5, None),
            item(3, None, 0, 1, None),
        ];
        let ids: Vec<i64> = low_stock(&items).iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_stock_value_unpriced() {
        let rows =
            stock_value(&[item(1, None, 4, 0, None), item(2, None, 4, 0, Some(125))]).unwrap();
        assert_eq!(rows[0].total_value, None);
        assert_eq!(rows[1].total_value, Some(Decimal::new(500, 2)));
    }

    #[test]
    fn test_transaction_summary_order() {
        let records = vec![
            record(1, TransactionKind::Adjustment, 4, 1),
            record(2, TransactionKind::Out, 3, 1),
            record(3, TransactionKind::Out, 2, 2),
        ];
        let summary = transaction_summary(&records).unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].kind, TransactionKind::Out);
        assert_eq!(summary[0].transactions, 2);
        assert_eq!(summary[0].quantity, 5);
        assert_eq!(summary[1].kind, TransactionKind::Adjustment);
    }

    #[test]
    fn test_category_breakdown_groups_missing() {
        let items = vec![
            item(1, Some("Paint"), 3, 0, None),
            item(2, None, 4, 0, None),
            item(3, Some("Hardware"), 1, 0, None),
            item(4, Some(" "), 2, 0, None),
            item(5, Some("Paint"), 2, 0, None),
        ];
        let breakdown = category_breakdown(&items).unwrap();
        let categories: Vec<&str> = breakdown.iter().map(|row| row.category.as_str()).collect();

        assert_eq!(categories, vec!["Hardware", "Paint", UNCATEGORIZED]);
        assert_eq!(breakdown[1].quantity, 5);
        assert_eq!(breakdown[2].items, 2);
        assert_eq!(breakdown[2].quantity, 6);
    }

    #[test]
    fn test_daily_activity_oldest_first() {
        let records = vec![
            record(3, TransactionKind::In, 5, 3),
            record(2, TransactionKind::Out, 1, 1),
            record(1, TransactionKind::Out, 2, 1),
        ];
        let activity = daily_activity(&records).unwrap();

        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(activity[0].quantity, 3);
        assert_eq!(activity[1].kind, TransactionKind::In);
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        let mut bulk = item(1, None, 9_000_000_000_000_000_000, 0, None);
        bulk.unit_price = Some(Decimal::new(10_000_000_000, 0));

        let err = dashboard(std::slice::from_ref(&bulk)).unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
        assert!(stock_value(&[bulk]).is_err());
    }

    #[test]
    fn test_sum_overflow_is_an_error() {
        let mut bulk = item(1, None, 7_000_000_000_000_000_000, 0, None);
        bulk.unit_price = Some(Decimal::new(10_000_000_000, 0));
        assert!(dashboard(std::slice::from_ref(&bulk)).is_ok());

        assert!(dashboard(&[bulk.clone(), bulk]).is_err());
    }

    #[test]
    fn test_large_values_that_fit_are_summed() {
        let mut bulk = item(1, None, 1_000_000_000_000_000_000, 0, None);
        bulk.unit_price = Some(Decimal::new(10_000_000_000, 0));
        let summary = dashboard(&[bulk.clone(), bulk]).unwrap();

        let expected =
            Decimal::from(2_000_000_000_000_000_000i64) * Decimal::new(10_000_000_000, 0);
        assert_eq!(summary.total_value, expected);
    }

    #[test]
    fn test_quantity_totals_overflow_is_an_error() {
        let records = vec![
            record(1, TransactionKind::Adjustment, i64::MAX, 1),
            record(2, TransactionKind::Adjustment, i64::MAX, 1),
        ];
        assert!(matches!(
            transaction_summary(&records),
            Err(StockError::Validation(_))
        ));
        assert!(daily_activity(&records).is_err());

        let items = vec![
            item(1, Some("Bulk"), i64::MAX, 0, None),
            item(2, Some("Bulk"), 1, 0, None),
        ];
        assert!(category_breakdown(&items).is_err());
    }
}
