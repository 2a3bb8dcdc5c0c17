//! Update item command handler.
//!
//! The existing item is fetched first so omitted fields keep their values;
//! the store then receives a full replacement.

use serde_json::json;

use stockroom_core::storage::{InventoryStore, NewItem};

use crate::app::AppContext;
use crate::cli::UpdateArgs;
use crate::errors::CliError;
use crate::helpers::updated_item_from_fields;
use crate::output::{print_json, status_json};
use crate::ui::{print, receipt};

pub fn handle_update<S: InventoryStore>(
    ctx: &AppContext,
    store: &mut S,
    args: &UpdateArgs,
) -> anyhow::Result<()> {
    let existing = store
        .get_item(args.id)?
        .ok_or_else(|| CliError::item_not_found(args.id))?;

    let ui_ctx = ctx.ui_context(args.json, None)?;
    let interactive = !args.no_input && ui_ctx.is_interactive();
    let replacement =
        updated_item_from_fields(&ui_ctx, NewItem::from(&existing), &args.fields, interactive)?;

    // Deleted between the fetch and the write
    if !store.update_item(args.id, &replacement)? {
        return Err(CliError::item_not_found(args.id).into());
    }

    if ui_ctx.mode.is_json() {
        return print_json(&status_json(json!({ "id": args.id, "name": replacement.name })));
    }

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Updated item",
                &[
                    ("ID", args.id.to_string()),
                    ("Name", replacement.name.clone()),
                    ("Quantity", replacement.quantity.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
