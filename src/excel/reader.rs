//! Workbook reader - any calamine-supported workbook → `Sheet` tables

use crate::error::{SheetcastError, SheetcastResult};
use crate::types::{CellValue, Sheet, Table};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only handle on one workbook file
///
/// The underlying file is released when the reader is dropped.
pub struct WorkbookReader {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Open a workbook, detecting the format from its extension
    pub fn open<P: AsRef<Path>>(path: P) -> SheetcastResult<Self> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path).map_err(|source| SheetcastError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { workbook })
    }

    /// Sheet names in workbook order (not alphabetical)
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Load one sheet, using its first row as column headers
    pub fn read_sheet(&mut self, sheet_name: &str) -> SheetcastResult<Sheet> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|source| SheetcastError::Sheet {
                sheet: sheet_name.to_string(),
                source,
            })?;

        Ok(Sheet::new(sheet_name, range_to_table(sheet_name, &range)))
    }
}

/// Convert a used cell range to a table (header row + data rows)
///
/// Columns are anchored at column A: a range that starts further right is
/// padded with blank leading columns. The header is the first used row.
fn range_to_table(sheet_name: &str, range: &Range<Data>) -> Table {
    let Some((_, first_col)) = range.start() else {
        return Table::default();
    };
    let lead = first_col as usize;
    let row_values = |row: &[Data]| -> Vec<CellValue> {
        std::iter::repeat(CellValue::Empty)
            .take(lead)
            .chain(row.iter().map(cell_value))
            .collect()
    };

    let mut rows = range.rows();
    let header: Vec<CellValue> = rows.next().map(row_values).unwrap_or_default();
    let mut table = Table::new(header_names(&header));
    debug!(sheet = sheet_name, columns = ?table.columns, "header row");

    let mut skipped = 0usize;
    for row in rows {
        let values = row_values(row);
        if values.iter().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }
        table.push_row(values);
    }

    if skipped > 0 {
        warn!(sheet = sheet_name, skipped, "skipped blank rows");
    }

    trim_midnight_dates(&mut table);
    table
}

/// Render date-only columns as `YYYY-MM-DD`
///
/// Applies to columns whose non-empty cells are all date/times at midnight.
fn trim_midnight_dates(table: &mut Table) {
    const MIDNIGHT: &str = " 00:00:00";

    for ci in 0..table.column_count() {
        let mut values = table.rows.iter().map(|row| &row[ci]).filter(|v| !v.is_empty());
        let mut any = false;
        let date_only = values.all(|value| {
            any = true;
            matches!(value, CellValue::DateTime(s) if s.ends_with(MIDNIGHT))
        });
        if !(any && date_only) {
            continue;
        }

        for row in &mut table.rows {
            if let CellValue::DateTime(s) = &mut row[ci] {
                s.truncate(s.len() - MIDNIGHT.len());
            }
        }
    }
}

/// Column names from the header row
///
/// Blank headers become `Unnamed: {index}`; repeated names get `.1`, `.2`, ...
fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let base = match cell.as_text() {
            Some(text) => text,
            None => format!("Unnamed: {}", idx),
        };

        let mut name = base.clone();
        let mut counter = 0;
        while seen.contains(&name) {
            counter += 1;
            name = format!("{}.{}", base, counter);
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

/// Convert a calamine cell to a `CellValue`
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime.to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::DateTime(s.replacen('T', " ", 1)),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
