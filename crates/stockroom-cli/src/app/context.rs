//! Application context for the Stockroom CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file and the
//! request context passed into store operations.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use stockroom_core::storage::{InventoryStore, RequestContext, SqliteStore};

use crate::cli::Cli;
use crate::config::{read_config, StockroomConfig};
use crate::errors::CliError;
use crate::ui::{OutputFormat, UiContext};

use super::resolver::{resolve_config_path, resolve_database_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<StockroomConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file contents, or `None` when no config file exists.
    pub fn config(&self) -> anyhow::Result<Option<&StockroomConfig>> {
        let loaded = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(loaded.as_ref())
    }

    /// Who is acting: `--user`, then the config's session user, then the default.
    pub fn request_context(&self) -> anyhow::Result<RequestContext> {
        if let Some(user) = self.cli.user.as_deref() {
            return Ok(RequestContext::new(user));
        }
        let configured = self
            .config()?
            .and_then(|config| config.session.user.clone())
            .unwrap_or_default();
        Ok(RequestContext::new(configured))
    }

    /// Resolve the database path for this invocation.
    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        resolve_database_path(self.cli, self.config()?)
    }

    /// Open the inventory store for the rest of the session.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.database_path()?;
        Ok(SqliteStore::open(&path)?)
    }

    /// Build a UI context for output rendering.
    ///
    /// `--format` is validated here so every command rejects bad values the same way.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> anyhow::Result<UiContext> {
        let format = format
            .map(|value| {
                value
                    .parse::<OutputFormat>()
                    .map_err(|e| CliError::invalid_input(e.to_string()))
            })
            .transpose()?;
        if json && format.is_some() {
            return Err(CliError::invalid_input("--format cannot be used with --json").into());
        }
        Ok(UiContext::from_env(
            json,
            format,
            self.cli.no_color,
            self.cli.ascii,
        ))
    }
}
