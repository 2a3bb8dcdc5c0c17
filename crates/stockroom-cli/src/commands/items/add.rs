//! Add item command handler.

use serde_json::json;

use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::new_item_from_fields;
use crate::output::{print_json, status_json};
use crate::ui::{print, receipt};

pub fn handle_add<S: InventoryStore>(
    ctx: &AppContext,
    store: &mut S,
    args: &AddArgs,
) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None)?;
    let interactive = !args.no_input && ui_ctx.is_interactive();

    let item = new_item_from_fields(&ui_ctx, &args.fields, interactive)?;
    let id = store.create_item(&item)?;

    if ui_ctx.mode.is_json() {
        return print_json(&status_json(json!({ "id": id, "name": item.name })));
    }

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Added item",
                &[
                    ("ID", id.to_string()),
                    ("Name", item.name.clone()),
                    ("Quantity", item.quantity.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
