//! Dashboard command handler.
//!
//! Headline totals followed by the stock level of every item.

use serde_json::json;

use stockroom_core::report;
use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::DashboardArgs;
use crate::output::{stock_level_rows, Listing, STOCK_LEVEL_COLUMNS};
use crate::ui::format::format_money;
use crate::ui::{kv, Badge};

pub fn handle_dashboard<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &DashboardArgs,
) -> anyhow::Result<()> {
    let items = store.list_items()?;
    let summary = report::dashboard(&items)?;

    let ui_ctx = ctx.ui_context(args.output.json, args.output.format.as_deref())?;
    let total_value = if ui_ctx.mode.is_pretty() {
        format_money(summary.total_value)
    } else {
        summary.total_value.to_string()
    };
    let preamble = vec![
        kv(&ui_ctx, "Total Items", &summary.total_items.to_string()),
        kv(&ui_ctx, "Low Stock Items", &summary.low_stock_items.to_string()),
        kv(&ui_ctx, "Total Value", &total_value),
    ];

    let value = json!({ "summary": summary, "items": items });
    let mut listing = Listing::new("dashboard", &value, &STOCK_LEVEL_COLUMNS, |_| {
        stock_level_rows(&items)
    })
    .preamble(preamble)
    .empty(Badge::Info, "No items yet. Add one with `stockroom add`.");
    if summary.low_stock_items > 0 {
        listing = listing.footer(
            Badge::Warn,
            format!(
                "{} items need restocking; see `stockroom low-stock`",
                summary.low_stock_items
            ),
        );
    }
    listing.emit(ctx, &args.output)
}
