use std::path::Path;

use stockroom_core::storage::InventoryStore;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::ui::{print, prompt, receipt};

pub fn handle_backup<S: InventoryStore>(
    ctx: &AppContext,
    store: &S,
    args: &BackupArgs,
) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None)?;
    let destination = Path::new(&args.destination);

    if ui_ctx.is_interactive() && !ctx.quiet() {
        let proceed = prompt::confirm(
            &ui_ctx,
            &format!("Back up inventory to {}?", destination.display()),
            true,
        )?;
        if !proceed {
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create backup directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }
    }

    store.backup_to(destination)?;
    let bytes = std::fs::metadata(destination).map(|m| m.len()).unwrap_or(0);
    if bytes == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Backed up inventory",
                &[
                    ("Destination", destination.display().to_string()),
                    ("Bytes", bytes.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
