use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::output::{item_detail, print_json};
use crate::ui::{blank_line, header, print};

pub fn handle_show<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &ShowArgs,
) -> anyhow::Result<()> {
    let item = store
        .get_item(args.id)?
        .ok_or_else(|| CliError::item_not_found(args.id))?;

    let ui_ctx = ctx.ui_context(args.json, None)?;
    if ui_ctx.mode.is_json() {
        return print_json(&item);
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "show", Some(&item.name)));
        blank_line(&ui_ctx);
    }
    for line in item_detail(&ui_ctx, &item) {
        print(&ui_ctx, &line);
    }
    Ok(())
}
