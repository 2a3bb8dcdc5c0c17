//! Delimited-text export of displayed tables.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::ui::Column;

/// Write a header row of column names followed by `rows`.
pub fn write_csv<W: Write>(writer: W, columns: &[Column], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns.iter().map(|c| c.header))?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export to `destination`, where `-` means stdout.
pub fn export_csv(destination: &str, columns: &[Column], rows: &[Vec<String>]) -> anyhow::Result<()> {
    if destination == "-" {
        let stdout = std::io::stdout();
        return write_csv(stdout.lock(), columns, rows);
    }

    let path = Path::new(destination);
    let file = std::fs::File::create(path)
        .map_err(|e| anyhow::anyhow!("Failed to create export file {}: {}", path.display(), e))?;
    write_csv(file, columns, rows)?;
    info!(path = %path.display(), rows = rows.len(), "exported csv");
    Ok(())
}
