//! Tracing/logging initialization.
//!
//! Filter precedence: `STOCKROOM_LOG`, then `RUST_LOG`, then the config file
//! level, then `warn`. Logs go to stderr unless the config names a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_ENV};

/// Build the log filter from the environment and an optional configured level.
pub fn resolve_filter(config_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    config_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Initialize tracing for the process.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(config_level: Option<&str>, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = resolve_filter(config_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }

    Ok(())
}

/// Initialize tracing, falling back to stderr when the log file cannot be opened.
///
/// Returns the file error when the fallback was taken so the caller can report it
/// once logging is up.
pub fn init_or_stderr(
    config_level: Option<&str>,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<anyhow::Error>> {
    match init(config_level, log_file) {
        Ok(()) => Ok(None),
        Err(file_err) => {
            init(config_level, None)?;
            Ok(Some(file_err))
        }
    }
}
