//! Delimited-text input

use crate::error::{SheetcastError, SheetcastResult};
use crate::types::{CellValue, Table};
use std::fs;
use std::path::Path;

/// Load a CSV file (optionally BOM-prefixed) into a table
///
/// The first record is the header. Empty fields load as `CellValue::Empty`,
/// everything else as text.
pub fn read_csv(path: &Path) -> SheetcastResult<Table> {
    if !path.exists() {
        return Err(SheetcastError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(parse_csv(&content)?)
}

/// Parse CSV text into a table
pub fn parse_csv(content: &str) -> csv::Result<Table> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);

    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(CellValue::from).collect());
    }

    Ok(table)
}
