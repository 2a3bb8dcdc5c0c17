use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{item_rows, Listing, ITEM_COLUMNS};
use crate::ui::Badge;

pub fn handle_list<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let items = store.list_items()?;
    let count = format!("{} items", items.len());

    Listing::new("list", &items, &ITEM_COLUMNS, |pretty| {
        item_rows(&items, pretty)
    })
    .context(count)
    .empty(Badge::Info, "No items yet. Add one with `stockroom add`.")
    .emit(ctx, &args.output)
}
