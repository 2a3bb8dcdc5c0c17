use stockroom_core::storage::{InventoryStore, TransactionFilter};

use crate::app::AppContext;
use crate::cli::HistoryArgs;
use crate::errors::CliError;
use crate::helpers::parse_kind;
use crate::output::{transaction_rows, Listing, TRANSACTION_COLUMNS};
use crate::ui::Badge;

pub fn handle_history<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &HistoryArgs,
) -> anyhow::Result<()> {
    let mut filter = TransactionFilter::new();
    let mut context = Vec::new();

    if let Some(item_id) = args.item {
        let item = store
            .get_item(item_id)?
            .ok_or_else(|| CliError::item_not_found(item_id))?;
        context.push(item.name);
        filter = filter.item(item_id);
    }
    if let Some(ref kind) = args.r#type {
        let kind = parse_kind(kind)?;
        context.push(kind.to_string());
        filter = filter.kind(kind);
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(CliError::invalid_input("--limit must be at least 1").into());
        }
        filter = filter.limit(limit);
    }

    let records = store.list_transactions(&filter)?;
    context.push(format!("{} transactions", records.len()));

    Listing::new("history", &records, &TRANSACTION_COLUMNS, |pretty| {
        transaction_rows(&records, pretty)
    })
    .context(context.join(", "))
    .empty(Badge::Info, "No transactions recorded.")
    .emit(ctx, &args.output)
}
