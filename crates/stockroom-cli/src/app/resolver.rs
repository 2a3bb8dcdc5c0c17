//! Path resolution for config and database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, StockroomConfig};
use crate::constants::CONFIG_ENV;
use crate::errors::CliError;

/// Resolve the config file path, checking STOCKROOM_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the database path from `--db` / `STOCKROOM_DB`, then the config file.
pub fn resolve_database_path(
    cli: &Cli,
    config: Option<&StockroomConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Some(config) = config {
        return Ok(PathBuf::from(&config.database.path));
    }

    let config_path = resolve_config_path()?;
    Err(CliError::not_found(
        missing_database_message(&config_path),
        "Hint: Run `stockroom init` or pass --db <PATH>.",
    )
    .into())
}

/// Error message when no database has been configured.
pub fn missing_database_message(config_path: &Path) -> String {
    format!(
        "No inventory database configured (no config at {})\n\nRun:\n  stockroom init\n\nOr specify a database path:\n  STOCKROOM_DB=/path/to/inventory.db stockroom list",
        config_path.display()
    )
}
