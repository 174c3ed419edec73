//! Plain comma-joined export of a decoded table.
//!
//! The output is deliberately naive: no quoting, no escaping, rows joined by
//! `\n` with no trailing newline. Character values containing commas or
//! newlines produce ambiguous output.

use std::fs;
use std::path::Path;

use log::info;

use super::types::error::Result;
use super::types::models::Table;

/// Options for CSV export.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Leave out records whose deletion flag is set.
    pub skip_deleted: bool,
}

/// Renders the table as CSV text.
pub fn to_csv(table: &Table, options: &CsvOptions) -> String {
    let mut out = table.field_names().collect::<Vec<_>>().join(",");

    for record in &table.records {
        if options.skip_deleted && record.deleted {
            continue;
        }
        out.push('\n');
        let row: Vec<String> = record.values.iter().map(ToString::to_string).collect();
        out.push_str(&row.join(","));
    }

    out
}

/// Renders the table as CSV and writes it to `path`.
pub fn write_csv(table: &Table, path: impl AsRef<Path>, options: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    let data = to_csv(table, options);
    fs::write(path, data.as_bytes())?;
    info!("Wrote {} bytes of CSV to {}", data.len(), path.display());
    Ok(())
}
