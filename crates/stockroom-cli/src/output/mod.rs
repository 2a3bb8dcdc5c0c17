//! Output formatting helpers for the CLI.
//!
//! Listing commands describe what they show once (`Listing`) and this module
//! routes it to JSON, a table, plain text or a CSV export.

mod csv;
mod json;
mod text;

use serde::Serialize;

use crate::app::AppContext;
use crate::cli::ListingArgs;
use crate::errors::CliError;
use crate::ui::{self, Badge, Column, UiContext};

// Re-export public API
pub use self::csv::export_csv;
pub use json::{print_json, status_json};
pub use text::*;

/// A table-shaped result plus its JSON form.
pub struct Listing<'a, T: Serialize + ?Sized, F: Fn(bool) -> Vec<Vec<String>>> {
    /// Command name shown in the header
    pub command: &'a str,
    /// Extra header context (counts, filters)
    pub context: Option<String>,
    /// Value printed with `--json`
    pub json: &'a T,
    pub columns: &'a [Column],
    /// Row builder; the flag selects pretty (human) cell formatting
    pub rows: F,
    /// Lines printed above the table (not exported)
    pub preamble: Vec<String>,
    /// Badge and message shown when there are no rows
    pub empty: (Badge, &'a str),
    /// Badge line shown below a non-empty table
    pub footer: Option<(Badge, String)>,
}

impl<'a, T: Serialize + ?Sized, F: Fn(bool) -> Vec<Vec<String>>> Listing<'a, T, F> {
    pub fn new(command: &'a str, json: &'a T, columns: &'a [Column], rows: F) -> Self {
        Self {
            command,
            context: None,
            json,
            columns,
            rows,
            preamble: Vec::new(),
            empty: (Badge::Info, "Nothing to show"),
            footer: None,
        }
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn preamble(mut self, lines: Vec<String>) -> Self {
        self.preamble = lines;
        self
    }

    pub fn empty(mut self, badge: Badge, message: &'a str) -> Self {
        self.empty = (badge, message);
        self
    }

    pub fn footer(mut self, badge: Badge, message: impl Into<String>) -> Self {
        self.footer = Some((badge, message.into()));
        self
    }

    /// Emit according to `--json`, `--format` and `--export`.
    pub fn emit(self, app: &AppContext, args: &ListingArgs) -> anyhow::Result<()> {
        if args.json && args.export.is_some() {
            return Err(CliError::invalid_input("--export cannot be used with --json").into());
        }
        let ctx = app.ui_context(args.json, args.format.as_deref())?;

        if let Some(destination) = args.export.as_deref() {
            let rows = (self.rows)(false);
            export_csv(destination, self.columns, &rows)?;
            if destination == "-" {
                return Ok(());
            }
            self.render(&ctx, app.quiet());
            if !app.quiet() {
                ui::print(
                    &ctx,
                    &ui::receipt(
                        &ctx,
                        "Exported CSV",
                        &[("Rows", rows.len().to_string()), ("File", destination.to_string())],
                    ),
                );
            }
            return Ok(());
        }

        if ctx.mode.is_json() {
            return print_json(self.json);
        }

        self.render(&ctx, app.quiet());
        Ok(())
    }

    /// Render in table or plain mode.
    pub fn render(&self, ctx: &UiContext, quiet: bool) {
        let rows = (self.rows)(ctx.mode.is_pretty());

        if ctx.mode.is_pretty() && !quiet {
            ui::print(ctx, &ui::header(ctx, self.command, self.context.as_deref()));
            ui::blank_line(ctx);
        }
        for line in &self.preamble {
            ui::print(ctx, line);
        }
        if !self.preamble.is_empty() {
            ui::blank_line(ctx);
        }

        if rows.is_empty() {
            if !quiet && ctx.mode.is_pretty() {
                ui::print(ctx, &ui::badge(ctx, self.empty.0, self.empty.1));
            }
            return;
        }

        ui::print(ctx, &ui::table(ctx, self.columns, &rows));
        if let Some((badge, message)) = &self.footer {
            if !quiet && ctx.mode.is_pretty() {
                ui::blank_line(ctx);
                ui::print(ctx, &ui::badge(ctx, *badge, message));
            }
        }
    }
}
