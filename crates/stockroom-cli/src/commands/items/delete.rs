use serde_json::json;

use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::output::{print_json, status_json};
use crate::ui::{badge, print, prompt, receipt, Badge};

pub fn handle_delete<S: InventoryStore>(
    ctx: &AppContext,
    store: &mut S,
    args: &DeleteArgs,
) -> anyhow::Result<()> {
    let item = store
        .get_item(args.id)?
        .ok_or_else(|| CliError::item_not_found(args.id))?;

    let ui_ctx = ctx.ui_context(args.json, None)?;
    if !args.yes {
        if !ui_ctx.is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation; pass --yes",
            )
            .into());
        }
        let prompt_text = format!(
            "Delete '{}' and all of its transactions? This cannot be undone",
            item.name
        );
        if !prompt::confirm(&ui_ctx, &prompt_text, false)? {
            if !ctx.quiet() {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Delete cancelled"));
            }
            return Ok(());
        }
    }

    if !store.delete_item(args.id)? {
        return Err(CliError::item_not_found(args.id).into());
    }

    if ui_ctx.mode.is_json() {
        return print_json(&status_json(json!({ "id": args.id, "deleted": true })));
    }

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Deleted item",
                &[("ID", args.id.to_string()), ("Name", item.name)],
            ),
        );
    }
    Ok(())
}
