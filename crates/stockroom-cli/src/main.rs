//! Stockroom CLI - track stock items, their movements and reports from the terminal
//!
//! This is the command-line interface for Stockroom. It resolves the database
//! and config, opens the store once per run and dispatches to the command
//! handlers.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;
use tracing::{debug, error, warn};

use stockroom_core::storage::{InventoryStore, SqliteStore};
use stockroom_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{
    dashboard, init, items, low_stock, maintenance, menu, misc, reports, search, transactions,
};
use crate::constants::exit_codes;
use crate::errors::{error_parts, exit_code_for};
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    init_logging(&ctx);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx
            .ui_context(false, None)
            .unwrap_or_else(|_| UiContext::from_env(false, None, cli.no_color, cli.ascii));
        let code = exit_code_for(&e);
        if code == exit_codes::GENERAL {
            error!(error = %format!("{:#}", e), "command failed");
        } else {
            debug!(error = %format!("{:#}", e), code, "command failed");
        }

        let (message, hint) = error_parts(&e);
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(code);
    }
}

/// Set up tracing from the config's `[logging]` section when one is readable.
fn init_logging(ctx: &AppContext) {
    let logging = ctx.config().ok().flatten().map(|config| &config.logging);
    let level = logging.and_then(|section| section.level.as_deref());
    let file = logging
        .and_then(|section| section.file.as_deref())
        .map(Path::new);

    match logging::init_or_stderr(level, file) {
        Ok(None) => {}
        Ok(Some(file_err)) => {
            warn!(error = %file_err, "log file unavailable; logging to stderr");
        }
        Err(e) => eprintln!("warning: logging disabled: {:#}", e),
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    // Commands that never touch an existing database
    match &cli.command {
        Some(Commands::Init(args)) => return init::handle_init(ctx, args),
        Some(Commands::Completions(args)) => return misc::handle_completions(args),
        None if !(std::io::stdin().is_terminal() && std::io::stdout().is_terminal()) => {
            print_quickstart();
            return Ok(());
        }
        _ => {}
    }

    let mut store = ctx.open_store()?;
    let result = dispatch(ctx, &mut store, cli.command.as_ref());
    let closed = store.close();
    result?;
    closed?;
    Ok(())
}

fn dispatch(
    ctx: &AppContext,
    store: &mut SqliteStore,
    command: Option<&Commands>,
) -> anyhow::Result<()> {
    match command {
        Some(Commands::Dashboard(args)) => dashboard::handle_dashboard(ctx, store, args),
        Some(Commands::Add(args)) => items::handle_add(ctx, store, args),
        Some(Commands::List(args)) => items::handle_list(ctx, store, args),
        Some(Commands::Show(args)) => items::handle_show(ctx, store, args),
        Some(Commands::Update(args)) => items::handle_update(ctx, store, args),
        Some(Commands::Delete(args)) => items::handle_delete(ctx, store, args),
        Some(Commands::Record(args)) => transactions::handle_record(ctx, store, args),
        Some(Commands::History(args)) => transactions::handle_history(ctx, store, args),
        Some(Commands::LowStock(args)) => low_stock::handle_low_stock(ctx, store, args),
        Some(Commands::Search(args)) => search::handle_search(ctx, store, args),
        Some(Commands::Report(args)) => reports::handle_report(ctx, store, args),
        Some(Commands::Check(args)) => maintenance::handle_check(ctx, store, args),
        Some(Commands::Backup(args)) => maintenance::handle_backup(ctx, store, args),
        Some(Commands::Menu) | None => menu::handle_menu(ctx, store),
        Some(Commands::Init(_)) | Some(Commands::Completions(_)) => Ok(()),
    }
}

fn print_quickstart() {
    println!("Stockroom v{}", VERSION);
    println!("\nQuickstart:");
    println!("  stockroom init");
    println!("  stockroom add --name Widget --quantity 10 --price 2.50 --min-stock 5");
    println!("  stockroom record 1 out 3 --notes \"order 1042\"");
    println!("  stockroom low-stock");
    println!("  stockroom report stock-value");
    println!("\nRun `stockroom --help` for full usage, or `stockroom` in a terminal for the menu.");
}
