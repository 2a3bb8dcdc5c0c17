//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unclassified failure, including query failures.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, database, item).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// An OUT transaction asked for more than is on hand.
    pub const INSUFFICIENT_STOCK: i32 = 5;

    /// The database could not be opened.
    pub const CONNECTION_FAILED: i32 = 6;

    /// An item with the same name already exists.
    pub const DUPLICATE_NAME: i32 = 7;
}

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STOCKROOM_CONFIG";

/// Environment variable holding a log filter (takes precedence over `RUST_LOG`).
pub const LOG_ENV: &str = "STOCKROOM_LOG";

/// Log level used when neither the environment nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
