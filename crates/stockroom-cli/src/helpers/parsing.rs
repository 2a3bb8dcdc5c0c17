//! Parsing helpers for prices, transaction types and search fields.

use std::str::FromStr;

use rust_decimal::Decimal;

use stockroom_core::storage::{SearchField, TransactionKind};

use crate::errors::CliError;

/// Parse a unit price such as `2.50` or `$1,299.00`.
pub fn parse_price(value: &str) -> anyhow::Result<Decimal> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    let price = Decimal::from_str(&cleaned)
        .map_err(|_| CliError::invalid_input(format!("Invalid price: {}", value)))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CliError::invalid_input(format!("Price cannot be negative: {}", value)).into());
    }
    Ok(price)
}

/// Parse a transaction type (`in`, `out`, `adjustment`, any case).
pub fn parse_kind(value: &str) -> anyhow::Result<TransactionKind> {
    value
        .parse::<TransactionKind>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Parse a search field name.
pub fn parse_search_field(value: &str) -> anyhow::Result<SearchField> {
    value
        .parse::<SearchField>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Trimmed text, or `None` when blank.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
