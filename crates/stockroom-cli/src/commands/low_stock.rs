use stockroom_core::report;
use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::LowStockArgs;
use crate::output::{item_rows, Listing, ITEM_COLUMNS};
use crate::ui::Badge;

pub fn handle_low_stock<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &LowStockArgs,
) -> anyhow::Result<()> {
    let items = store.list_items()?;
    let low = report::low_stock(&items);

    Listing::new("low-stock", &low, &ITEM_COLUMNS, |pretty| {
        item_rows(low.iter().copied(), pretty)
    })
    .context(format!("{} of {} items", low.len(), items.len()))
    .empty(Badge::Ok, "All items are above their minimum stock.")
    .footer(
        Badge::Warn,
        format!("{} items at or below minimum stock", low.len()),
    )
    .emit(ctx, &args.output)
}
