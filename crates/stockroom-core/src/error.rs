//! Error types for Stockroom core operations.
//!
//! This module defines the error hierarchy for all store operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Stockroom operations.
pub type Result<T> = std::result::Result<T, StockError>;

/// Core error type for Stockroom operations.
#[derive(Debug, Error)]
pub enum StockError {
    /// The database could not be opened or initialized
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any statement failed while talking to the database
    #[error("Query failed: {0}")]
    Query(String),

    /// Input rejected before it reached the database
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// An outbound transaction asked for more than is on hand
    #[error(
        "Insufficient stock for item {item_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        item_id: i64,
        requested: i64,
        available: i64,
    },

    /// Item names are unique across the inventory
    #[error("An item named '{0}' already exists")]
    DuplicateName(String),
}

impl StockError {
    /// Whether the session can continue after this error.
    ///
    /// Only a lost or unusable connection is fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StockError::Connection(_))
    }
}

impl From<rusqlite::Error> for StockError {
    fn from(err: rusqlite::Error) -> Self {
        StockError::Query(err.to_string())
    }
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        StockError::Query(err.to_string())
    }
}

/// Returns true when `err` is a SQLite UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
