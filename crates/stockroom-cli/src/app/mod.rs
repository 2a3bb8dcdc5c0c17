//! Application-level utilities for the Stockroom CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and database files

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
