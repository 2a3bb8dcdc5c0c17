//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Placeholder shown for missing values in tables.
pub const EMPTY_CELL: &str = "-";

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Format a monetary amount with two decimals and thousands separators.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

/// Decimal as stored, for machine-oriented output (CSV, plain).
pub fn format_decimal(amount: Option<Decimal>) -> String {
    amount.map(|value| value.to_string()).unwrap_or_default()
}

/// Optional text, empty when missing.
pub fn optional(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Cell text for table display; empty values become a placeholder.
pub fn display_cell(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_CELL
    } else {
        value
    }
}
