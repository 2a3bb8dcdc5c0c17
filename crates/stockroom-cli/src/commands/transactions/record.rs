//! Record transaction command handler.

use stockroom_core::storage::{InventoryStore, NewTransaction};

use crate::app::AppContext;
use crate::cli::RecordArgs;
use crate::errors::CliError;
use crate::helpers::{non_empty, parse_kind};
use crate::output::{print_json, status_json};
use crate::ui::{badge, print, receipt, Badge};

pub fn handle_record<S: InventoryStore>(
    ctx: &AppContext,
    store: &mut S,
    args: &RecordArgs,
) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    if args.quantity <= 0 {
        return Err(CliError::invalid_input(format!(
            "Quantity must be positive, got {}",
            args.quantity
        ))
        .into());
    }

    let ui_ctx = ctx.ui_context(args.json, None)?;
    let request = ctx.request_context()?;

    let mut transaction = NewTransaction::new(args.id, kind, args.quantity);
    if let Some(notes) = non_empty(args.notes.as_deref()) {
        transaction = transaction.with_notes(notes);
    }

    let recorded = store.record_transaction(&request, &transaction)?;

    if ui_ctx.mode.is_json() {
        let value = serde_json::to_value(recorded)?;
        return print_json(&status_json(value));
    }

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                &format!("Recorded {} transaction", recorded.kind),
                &[
                    ("Transaction", recorded.transaction_id.to_string()),
                    ("Item", recorded.item_id.to_string()),
                    ("Previous Quantity", recorded.previous_quantity.to_string()),
                    ("New Quantity", recorded.new_quantity.to_string()),
                    ("User", request.user.clone()),
                ],
            ),
        );

        if ui_ctx.mode.is_pretty() {
            if let Some(item) = store.get_item(recorded.item_id)? {
                if item.is_low_stock() {
                    print(
                        &ui_ctx,
                        &badge(
                            &ui_ctx,
                            Badge::Warn,
                            &format!(
                                "{} is at or below its minimum stock ({})",
                                item.name, item.minimum_stock
                            ),
                        ),
                    );
                }
            }
        }
    }
    Ok(())
}
