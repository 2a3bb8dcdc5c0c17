//! CLI error types for structured error handling.
//!
//! Handlers return `anyhow::Result`; the exit code is derived from whichever
//! typed error sits in the chain.

use std::fmt;

use stockroom_core::StockError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, database, item)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// NotFound error for a missing item id.
    pub fn item_not_found(id: i64) -> Self {
        CliError::not_found(
            format!("Item {} not found", id),
            "Hint: Run `stockroom list` to see item IDs.",
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a store error.
pub fn stock_exit_code(err: &StockError) -> i32 {
    match err {
        StockError::Connection(_) => exit_codes::CONNECTION_FAILED,
        StockError::Query(_) => exit_codes::GENERAL,
        StockError::Validation(_) => exit_codes::INVALID_INPUT,
        StockError::NotFound(_) => exit_codes::NOT_FOUND,
        StockError::InsufficientStock { .. } => exit_codes::INSUFFICIENT_STOCK,
        StockError::DuplicateName(_) => exit_codes::DUPLICATE_NAME,
    }
}

/// Exit code for any error returned by a handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(stock) = cause.downcast_ref::<StockError>() {
            return stock_exit_code(stock);
        }
    }
    exit_codes::GENERAL
}

/// Whether an interactive session may continue after this error.
pub fn is_fatal(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<StockError>())
        .any(|stock| !stock.is_recoverable())
}

/// Split an error into the message to display and an optional hint.
///
/// An explicit `Hint:` line in the message wins; otherwise a hint is derived
/// from the store error in the chain, if any.
pub fn error_parts(err: &anyhow::Error) -> (String, Option<String>) {
    let message = err.to_string();
    if let Some(idx) = message.find("\nHint:") {
        return (
            message[..idx].to_string(),
            Some(message[idx + 1..].to_string()),
        );
    }
    (message, contextual_hint(err))
}

fn contextual_hint(err: &anyhow::Error) -> Option<String> {
    let stock = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<StockError>())?;
    let hint = match stock {
        StockError::InsufficientStock { item_id, .. } => format!(
            "Hint: Run `stockroom show {}` to check the quantity on hand.",
            item_id
        ),
        StockError::DuplicateName(name) => format!(
            "Hint: Run `stockroom search \"{}\"` to find the existing item.",
            name
        ),
        StockError::NotFound(_) => "Hint: Run `stockroom list` to see item IDs.".to_string(),
        StockError::Connection(_) => {
            "Hint: Check the path given by --db or the config file, or run `stockroom init`."
                .to_string()
        }
        StockError::Query(_) | StockError::Validation(_) => return None,
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_for_store_errors() {
        let err = anyhow::Error::new(StockError::InsufficientStock {
            item_id: 1,
            requested: 20,
            available: 7,
        });
        assert_eq!(exit_code_for(&err), exit_codes::INSUFFICIENT_STOCK);

        let err = anyhow::Error::new(StockError::DuplicateName("Widget".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::DUPLICATE_NAME);

        let err = anyhow::Error::new(StockError::Connection("locked".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::CONNECTION_FAILED);
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::new(StockError::Validation("bad".to_string()))
            .context("Failed to add item");
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_cli_errors_and_fallback() {
        let err = anyhow::Error::new(CliError::item_not_found(9));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert!(err.to_string().contains("Item 9 not found"));

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::GENERAL);
    }

    #[test]
    fn test_only_connection_errors_are_fatal() {
        let err = anyhow::Error::new(StockError::Connection("gone".to_string()));
        assert!(is_fatal(&err));

        let err = anyhow::Error::new(StockError::Query("syntax".to_string()));
        assert!(!is_fatal(&err));
        assert!(!is_fatal(&anyhow::anyhow!("cancelled")));
    }

    #[test]
    fn test_error_parts_splits_explicit_hint() {
        let err = anyhow::Error::new(CliError::item_not_found(9));
        let (message, hint) = error_parts(&err);
        assert_eq!(message, "Item 9 not found");
        assert_eq!(
            hint.as_deref(),
            Some("Hint: Run `stockroom list` to see item IDs.")
        );
    }

    #[test]
    fn test_error_parts_derives_hint_from_store_error() {
        let err = anyhow::Error::new(StockError::InsufficientStock {
            item_id: 4,
            requested: 20,
            available: 7,
        });
        let (message, hint) = error_parts(&err);
        assert!(message.contains("requested 20, available 7"));
        assert!(hint.unwrap_or_default().contains("stockroom show 4"));

        let (_, hint) = error_parts(&anyhow::anyhow!("plain failure"));
        assert!(hint.is_none());
    }
}
