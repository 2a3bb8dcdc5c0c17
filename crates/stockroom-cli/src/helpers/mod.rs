//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Collecting item attributes from flags and prompts (`input`)
//! - Price, transaction type and search field parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{new_item_from_fields, updated_item_from_fields};
pub use parsing::{non_empty, parse_kind, parse_search_field};
