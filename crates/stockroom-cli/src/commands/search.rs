use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::SearchArgs;
use crate::helpers::parse_search_field;
use crate::output::{item_rows, Listing, ITEM_COLUMNS};
use crate::ui::Badge;

pub fn handle_search<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let field = parse_search_field(&args.field)?;
    // An empty term matches every item with a value in `field`
    let term = args.term.trim();
    let items = store.search_items(term, field)?;

    Listing::new("search", &items, &ITEM_COLUMNS, |pretty| {
        item_rows(&items, pretty)
    })
    .context(format!("{} contains \"{}\", {} matches", field, term, items.len()))
    .empty(Badge::Info, "No matching items.")
    .emit(ctx, &args.output)
}
