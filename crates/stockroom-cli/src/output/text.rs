//! Text and table output for items and transactions.

use stockroom_core::report::{CategoryTotal, DailyActivity, KindTotal, StockValueRow};
use stockroom_core::storage::{Item, TransactionRecord};

use crate::ui::format::{format_datetime, format_decimal, format_money, optional, truncate};
use crate::ui::{kv, Column, UiContext};

/// Notes longer than this are shortened in tables (never in exports).
const NOTES_WIDTH: usize = 40;

pub const ITEM_COLUMNS: [Column; 11] = [
    Column::numeric("ID"),
    Column::new("Name"),
    Column::new("Category"),
    Column::numeric("Quantity"),
    Column::numeric("Unit Price"),
    Column::new("Supplier"),
    Column::new("Supplier Contact"),
    Column::new("Date Added"),
    Column::numeric("Min Stock"),
    Column::new("Barcode"),
    Column::new("Location"),
];

pub const TRANSACTION_COLUMNS: [Column; 7] = [
    Column::numeric("ID"),
    Column::new("Item Name"),
    Column::new("Type"),
    Column::numeric("Quantity"),
    Column::new("Date"),
    Column::new("Notes"),
    Column::new("User"),
];

pub const STOCK_LEVEL_COLUMNS: [Column; 4] = [
    Column::new("Name"),
    Column::numeric("Quantity"),
    Column::numeric("Min Stock"),
    Column::new("Status"),
];

pub const STOCK_VALUE_COLUMNS: [Column; 4] = [
    Column::new("Name"),
    Column::numeric("Quantity"),
    Column::numeric("Unit Price"),
    Column::numeric("Total Value"),
];

pub const KIND_TOTAL_COLUMNS: [Column; 3] = [
    Column::new("Type"),
    Column::numeric("Transactions"),
    Column::numeric("Quantity"),
];

pub const CATEGORY_COLUMNS: [Column; 3] = [
    Column::new("Category"),
    Column::numeric("Items"),
    Column::numeric("Quantity"),
];

pub const ACTIVITY_COLUMNS: [Column; 3] = [
    Column::new("Date"),
    Column::new("Type"),
    Column::numeric("Quantity"),
];

pub fn item_row(item: &Item, pretty: bool) -> Vec<String> {
    vec![
        item.id.to_string(),
        item.name.clone(),
        optional(item.category.as_deref()),
        item.quantity.to_string(),
        format_decimal(item.unit_price),
        optional(item.supplier.as_deref()),
        optional(item.supplier_contact.as_deref()),
        format_datetime(&item.date_added, pretty),
        item.minimum_stock.to_string(),
        optional(item.barcode.as_deref()),
        optional(item.location.as_deref()),
    ]
}

pub fn item_rows<'a>(items: impl IntoIterator<Item = &'a Item>, pretty: bool) -> Vec<Vec<String>> {
    items.into_iter().map(|item| item_row(item, pretty)).collect()
}

pub fn transaction_rows(records: &[TransactionRecord], pretty: bool) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let notes = optional(record.notes.as_deref());
            vec![
                record.id.to_string(),
                record.item_name.clone(),
                record.kind.to_string(),
                record.quantity.to_string(),
                format_datetime(&record.created_at, pretty),
                if pretty { truncate(&notes, NOTES_WIDTH) } else { notes },
                optional(record.user.as_deref()),
            ]
        })
        .collect()
}

pub fn stock_level_rows(items: &[Item]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| {
            let status = if item.is_low_stock() { "LOW" } else { "OK" };
            vec![
                item.name.clone(),
                item.quantity.to_string(),
                item.minimum_stock.to_string(),
                status.to_string(),
            ]
        })
        .collect()
}

pub fn stock_value_rows(rows: &[StockValueRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.quantity.to_string(),
                format_decimal(row.unit_price),
                format_decimal(row.total_value),
            ]
        })
        .collect()
}

pub fn kind_total_rows(totals: &[KindTotal]) -> Vec<Vec<String>> {
    totals
        .iter()
        .map(|total| {
            vec![
                total.kind.to_string(),
                total.transactions.to_string(),
                total.quantity.to_string(),
            ]
        })
        .collect()
}

pub fn category_rows(totals: &[CategoryTotal]) -> Vec<Vec<String>> {
    totals
        .iter()
        .map(|total| {
            vec![
                total.category.clone(),
                total.items.to_string(),
                total.quantity.to_string(),
            ]
        })
        .collect()
}

pub fn activity_rows(activity: &[DailyActivity]) -> Vec<Vec<String>> {
    activity
        .iter()
        .map(|day| {
            vec![
                day.date.format("%Y-%m-%d").to_string(),
                day.kind.to_string(),
                day.quantity.to_string(),
            ]
        })
        .collect()
}

/// Key-value detail lines for a single item.
pub fn item_detail(ctx: &UiContext, item: &Item) -> Vec<String> {
    let pretty = ctx.mode.is_pretty();
    let price = match (item.unit_price, pretty) {
        (Some(price), true) => format_money(price),
        (price, _) => format_decimal(price),
    };
    let value = match (item.stock_value(), pretty) {
        (Some(value), true) => format_money(value),
        (value, _) => format_decimal(value),
    };

    vec![
        kv(ctx, "ID", &item.id.to_string()),
        kv(ctx, "Name", &item.name),
        kv(ctx, "Category", &optional(item.category.as_deref())),
        kv(ctx, "Quantity", &item.quantity.to_string()),
        kv(ctx, "Unit Price", &price),
        kv(ctx, "Stock Value", &value),
        kv(ctx, "Min Stock", &item.minimum_stock.to_string()),
        kv(ctx, "Low Stock", if item.is_low_stock() { "yes" } else { "no" }),
        kv(ctx, "Supplier", &optional(item.supplier.as_deref())),
        kv(ctx, "Supplier Contact", &optional(item.supplier_contact.as_deref())),
        kv(ctx, "Barcode", &optional(item.barcode.as_deref())),
        kv(ctx, "Location", &optional(item.location.as_deref())),
        kv(ctx, "Date Added", &format_datetime(&item.date_added, pretty)),
    ]
}
