//! Interactive prompt primitives built on dialoguer.

use std::str::FromStr;

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Input, Select};

use super::context::UiContext;

fn theme(ctx: &UiContext) -> Box<dyn Theme> {
    if ctx.color {
        Box::new(ColorfulTheme::default())
    } else {
        Box::new(SimpleTheme)
    }
}

/// Prompt for a required line of text, re-asking while it is blank.
pub fn text(ctx: &UiContext, prompt: &str, initial: Option<&str>) -> anyhow::Result<String> {
    let theme = theme(ctx);
    let mut input = Input::<String>::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().is_empty() {
                Err("A value is required")
            } else {
                Ok(())
            }
        });
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    let value = input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    Ok(value.trim().to_string())
}

/// Prompt for optional text; an empty answer yields `None`.
pub fn optional_text(
    ctx: &UiContext,
    prompt: &str,
    initial: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let theme = theme(ctx);
    let mut input = Input::<String>::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    let value = input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Prompt for a value parsed with `FromStr`, re-asking until it parses.
pub fn parsed<T>(ctx: &UiContext, prompt: &str, initial: Option<String>) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    let theme = theme(ctx);
    let mut input = Input::<String>::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .validate_with(|value: &String| -> Result<(), String> {
            value
                .trim()
                .parse::<T>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    let value = input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    value
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

/// Ask a yes/no question.
pub fn confirm(ctx: &UiContext, prompt: &str, default: bool) -> anyhow::Result<bool> {
    let theme = theme(ctx);
    Confirm::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`, returning its index.
pub fn select<T: ToString>(
    ctx: &UiContext,
    prompt: &str,
    items: &[T],
    default: usize,
) -> anyhow::Result<usize> {
    let theme = theme(ctx);
    Select::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read selection: {}", e))
}
