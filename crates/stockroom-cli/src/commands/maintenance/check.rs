use serde_json::json;
use tracing::error;

use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::CheckArgs;
use crate::output::{print_json, status_json};
use crate::ui::{badge, hint, print, Badge, OutputMode};

pub fn handle_check<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &CheckArgs,
) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None)?;

    if let Err(err) = store.check_integrity() {
        error!(error = %err, "integrity check failed");
        match ui_ctx.mode {
            OutputMode::Pretty => {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Err, "Integrity check failed"));
                print(
                    &ui_ctx,
                    &hint(&ui_ctx, "Restore from a backup made with `stockroom backup`."),
                );
            }
            OutputMode::Plain => println!("status=failed"),
            OutputMode::Json => {}
        }
        return Err(err.into());
    }

    let items = store.list_items()?.len();
    match ui_ctx.mode {
        OutputMode::Json => print_json(&status_json(json!({ "items": items })))?,
        OutputMode::Pretty => {
            if !ctx.quiet() {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "All checks passed"));
            }
        }
        OutputMode::Plain => {
            if !ctx.quiet() {
                println!("check=integrity ok");
                println!("check=foreign_keys ok");
                println!("status=ok");
            }
        }
    }
    Ok(())
}
