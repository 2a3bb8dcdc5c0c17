//! `stockroom init`: create the database and write the config file.

use std::path::PathBuf;

use tracing::info;

use stockroom_core::storage::{InventoryStore, SqliteStore, DEFAULT_USER};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_database_path, write_config, StockroomConfig};
use crate::errors::CliError;
use crate::helpers::non_empty;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None)?;

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}; pass --force to replace it",
            config_path.display()
        ))
        .into());
    }

    let database_path = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) if !path.trim().is_empty() => absolute_path(PathBuf::from(path))?,
        _ => default_database_path()?,
    };
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }
    }

    let store = SqliteStore::open(&database_path)?;
    store.close()?;

    let user = non_empty(args.default_user.as_deref())
        .or_else(|| non_empty(ctx.cli().user.as_deref()));
    let config = StockroomConfig::new(database_path.clone(), user.clone());
    write_config(&config_path, &config)?;
    info!(
        database = %database_path.display(),
        config = %config_path.display(),
        "initialized inventory"
    );

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Initialized inventory",
                &[
                    ("Database", database_path.display().to_string()),
                    ("Config", config_path.display().to_string()),
                    ("User", user.unwrap_or_else(|| DEFAULT_USER.to_string())),
                ],
            ),
        );
        if ui_ctx.mode.is_pretty() {
            print(
                &ui_ctx,
                &hint(&ui_ctx, "Add your first item with `stockroom add --name <NAME>`."),
            );
        }
    }

    Ok(())
}

/// Anchor a relative path to the current directory before it goes into the config.
fn absolute_path(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to read the current directory: {}", e))?;
    Ok(cwd.join(path))
}
