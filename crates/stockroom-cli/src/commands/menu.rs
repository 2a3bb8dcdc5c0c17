//! Interactive menu.
//!
//! Loops over the ten inventory operations, prompting for whatever each
//! one needs and dispatching to the same handlers the subcommands use.
//! Failures are shown and the loop continues; a lost connection ends it.

use tracing::warn;

use stockroom_core::storage::{InventoryStore, SearchField, TransactionKind};

use crate::app::AppContext;
use crate::cli::{
    AddArgs, DashboardArgs, DeleteArgs, HistoryArgs, ListArgs, LowStockArgs, RecordArgs,
    ReportArgs, ReportKind, SearchArgs, ShowArgs, UpdateArgs,
};
use crate::errors::{error_parts, is_fatal, CliError};
use crate::ui::{blank_line, header, print, print_error, prompt, UiContext};

use super::{dashboard, items, low_stock, reports, search, transactions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Dashboard,
    AddItem,
    ViewInventory,
    UpdateItem,
    DeleteItem,
    RecordTransaction,
    TransactionHistory,
    LowStockAlerts,
    SearchItems,
    Reports,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 11] = [
        MenuChoice::Dashboard,
        MenuChoice::AddItem,
        MenuChoice::ViewInventory,
        MenuChoice::UpdateItem,
        MenuChoice::DeleteItem,
        MenuChoice::RecordTransaction,
        MenuChoice::TransactionHistory,
        MenuChoice::LowStockAlerts,
        MenuChoice::SearchItems,
        MenuChoice::Reports,
        MenuChoice::Exit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AddItem => "Add Item",
            Self::ViewInventory => "View Inventory",
            Self::UpdateItem => "Update Item",
            Self::DeleteItem => "Delete Item",
            Self::RecordTransaction => "Record Transaction",
            Self::TransactionHistory => "Transaction History",
            Self::LowStockAlerts => "Low Stock Alerts",
            Self::SearchItems => "Search Items",
            Self::Reports => "Reports",
            Self::Exit => "Exit",
        }
    }
}

pub fn handle_menu<S: InventoryStore>(ctx: &AppContext, store: &mut S) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None)?;
    if !ui_ctx.is_interactive() {
        return Err(CliError::invalid_input(
            "The menu needs an interactive terminal; run a subcommand instead (see `stockroom --help`)",
        )
        .into());
    }

    let labels: Vec<&str> = MenuChoice::ALL.iter().map(MenuChoice::label).collect();
    let mut selected = 0;

    loop {
        print(&ui_ctx, &header(&ui_ctx, "menu", None));
        selected = prompt::select(&ui_ctx, "What would you like to do?", &labels, selected)?;
        let choice = MenuChoice::ALL[selected];
        if choice == MenuChoice::Exit {
            return Ok(());
        }

        blank_line(&ui_ctx);
        if let Err(err) = run_choice(ctx, &ui_ctx, store, choice) {
            if is_fatal(&err) {
                return Err(err);
            }
            warn!(
                operation = choice.label(),
                error = %format!("{:#}", err),
                "menu operation failed"
            );
            let (message, hint) = error_parts(&err);
            print_error(&ui_ctx, &message, hint.as_deref());
        }
        blank_line(&ui_ctx);
    }
}

fn run_choice<S: InventoryStore>(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    store: &mut S,
    choice: MenuChoice,
) -> anyhow::Result<()> {
    match choice {
        MenuChoice::Dashboard => {
            dashboard::handle_dashboard(ctx, store, &DashboardArgs::default())
        }
        MenuChoice::AddItem => items::handle_add(ctx, store, &AddArgs::default()),
        MenuChoice::ViewInventory => items::handle_list(ctx, store, &ListArgs::default()),
        MenuChoice::UpdateItem => {
            let id = prompt::parsed::<i64>(ui_ctx, "Item ID", None)?;
            items::handle_show(ctx, store, &ShowArgs { id, json: false })?;
            blank_line(ui_ctx);
            let args = UpdateArgs {
                id,
                fields: Default::default(),
                json: false,
                no_input: false,
            };
            items::handle_update(ctx, store, &args)
        }
        MenuChoice::DeleteItem => {
            let id = prompt::parsed::<i64>(ui_ctx, "Item ID", None)?;
            let args = DeleteArgs {
                id,
                yes: false,
                json: false,
            };
            items::handle_delete(ctx, store, &args)
        }
        MenuChoice::RecordTransaction => {
            let id = prompt::parsed::<i64>(ui_ctx, "Item ID", None)?;
            let kinds: Vec<&str> = TransactionKind::ALL.iter().map(|k| k.as_str()).collect();
            let kind =
                TransactionKind::ALL[prompt::select(ui_ctx, "Transaction type", &kinds, 0)?];
            let quantity_prompt = match kind {
                TransactionKind::Adjustment => "New quantity on hand",
                TransactionKind::In | TransactionKind::Out => "Quantity",
            };
            let quantity = prompt::parsed::<i64>(ui_ctx, quantity_prompt, None)?;
            let notes = prompt::optional_text(ui_ctx, "Notes", None)?;
            let args = RecordArgs {
                id,
                kind: kind.as_str().to_string(),
                quantity,
                notes,
                json: false,
            };
            transactions::handle_record(ctx, store, &args)
        }
        MenuChoice::TransactionHistory => {
            let item = prompt::optional_text(ui_ctx, "Item ID (blank for all items)", None)?
                .map(|value| {
                    value
                        .parse::<i64>()
                        .map_err(|_| {
                            CliError::invalid_input(format!("Invalid item ID: {}", value))
                        })
                })
                .transpose()?;
            let args = HistoryArgs {
                item,
                ..HistoryArgs::default()
            };
            transactions::handle_history(ctx, store, &args)
        }
        MenuChoice::LowStockAlerts => {
            low_stock::handle_low_stock(ctx, store, &LowStockArgs::default())
        }
        MenuChoice::SearchItems => {
            let fields: Vec<&str> = SearchField::ALL.iter().map(|f| f.as_str()).collect();
            let field = SearchField::ALL[prompt::select(ui_ctx, "Search by", &fields, 0)?];
            let term = prompt::text(ui_ctx, "Search term", None)?;
            let args = SearchArgs {
                term,
                field: field.as_str().to_string(),
                output: Default::default(),
            };
            search::handle_search(ctx, store, &args)
        }
        MenuChoice::Reports => {
            let titles: Vec<&str> = ReportKind::ALL.iter().map(ReportKind::title).collect();
            let kind = ReportKind::ALL[prompt::select(ui_ctx, "Report", &titles, 0)?];
            let args = ReportArgs {
                kind,
                output: Default::default(),
            };
            reports::handle_report(ctx, store, &args)
        }
        MenuChoice::Exit => Ok(()),
    }
}
