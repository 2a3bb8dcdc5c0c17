//! Report command handler.
//!
//! Each report is aggregated in the core crate and rendered through the same
//! listing path as every other table, so `--json` and `--export` apply.

use stockroom_core::report;
use stockroom_core::storage::{InventoryStore, TransactionFilter};

use crate::app::AppContext;
use crate::cli::{ReportArgs, ReportKind};
use crate::output::{
    activity_rows, category_rows, kind_total_rows, stock_value_rows, Listing, ACTIVITY_COLUMNS,
    CATEGORY_COLUMNS, KIND_TOTAL_COLUMNS, STOCK_VALUE_COLUMNS,
};
use crate::ui::format::format_money;
use crate::ui::Badge;

const COMMAND: &str = "report";

pub fn handle_report<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &ReportArgs,
) -> anyhow::Result<()> {
    let title = args.kind.title();

    match args.kind {
        ReportKind::StockValue => {
            let items = store.list_items()?;
            let rows = report::stock_value(&items)?;
            let total = report::dashboard(&items)?.total_value;
            Listing::new(COMMAND, &rows, &STOCK_VALUE_COLUMNS, |_| stock_value_rows(&rows))
                .context(title)
                .empty(Badge::Info, "No items yet.")
                .footer(Badge::Info, format!("Total value {}", format_money(total)))
                .emit(ctx, &args.output)
        }
        ReportKind::TransactionSummary => {
            let records = store.list_transactions(&TransactionFilter::new())?;
            let totals = report::transaction_summary(&records)?;
            Listing::new(COMMAND, &totals, &KIND_TOTAL_COLUMNS, |_| {
                kind_total_rows(&totals)
            })
            .context(title)
            .empty(Badge::Info, "No transactions recorded.")
            .emit(ctx, &args.output)
        }
        ReportKind::CategoryBreakdown => {
            let items = store.list_items()?;
            let totals = report::category_breakdown(&items)?;
            Listing::new(COMMAND, &totals, &CATEGORY_COLUMNS, |_| category_rows(&totals))
                .context(title)
                .empty(Badge::Info, "No items yet.")
                .emit(ctx, &args.output)
        }
        ReportKind::Activity => {
            let records = store.list_transactions(&TransactionFilter::new())?;
            let activity = report::daily_activity(&records)?;
            Listing::new(COMMAND, &activity, &ACTIVITY_COLUMNS, |_| {
                activity_rows(&activity)
            })
            .context(title)
            .empty(Badge::Info, "No transactions recorded.")
            .emit(ctx, &args.output)
        }
    }
}
