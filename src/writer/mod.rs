//! Delimited-text output

use crate::error::{SheetcastError, SheetcastResult};
use crate::types::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark, written first so spreadsheet tools detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write a table to `path` as BOM-prefixed UTF-8 CSV
///
/// The header row is written first (nothing at all for a table without
/// columns), then every data row in order. The file is flushed and closed
/// before this returns, on success and on error.
pub fn write_csv(path: &Path, table: &Table) -> SheetcastResult<()> {
    let file = File::create(path).map_err(|e| SheetcastError::write(path, e))?;
    let mut out = BufWriter::new(file);

    out.write_all(UTF8_BOM)
        .map_err(|e| SheetcastError::write(path, e))?;
    write_table(&mut out, table).map_err(|e| SheetcastError::write(path, e.into()))?;
    out.flush().map_err(|e| SheetcastError::write(path, e))?;

    Ok(())
}

/// Serialize a table as CSV into any writer (no BOM)
pub fn write_table<W: Write>(out: W, table: &Table) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);

    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use tempfile::TempDir;

    fn render(table: &Table) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, table).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_table_header_then_rows() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![CellValue::Float(1.0), CellValue::from("x")]);
        table.push_row(vec![CellValue::Float(2.0), CellValue::from("y")]);

        assert_eq!(render(&table), "a,b\n1,x\n2,y\n");
    }

    #[test]
    fn test_write_table_quotes_when_needed() {
        let mut table = Table::new(vec!["note".to_string(), "n".to_string()]);
        table.push_row(vec![CellValue::from("hello, world"), CellValue::Empty]);
        table.push_row(vec![CellValue::from("say \"hi\""), CellValue::Int(3)]);

        assert_eq!(
            render(&table),
            "note,n\n\"hello, world\",\n\"say \"\"hi\"\"\",3\n"
        );
    }

    #[test]
    fn test_write_table_header_only() {
        let table = Table::new(vec!["name".to_string(), "value".to_string()]);
        assert_eq!(render(&table), "name,value\n");
    }

    #[test]
    fn test_write_table_no_columns() {
        assert_eq!(render(&Table::default()), "");
    }

    #[test]
    fn test_write_csv_starts_with_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        let mut table = Table::new(vec!["cidade".to_string()]);
        table.push_row(vec![CellValue::from("São Paulo")]);
        write_csv(&path, &table).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "cidade\nSão Paulo\n");
    }

    #[test]
    fn test_write_csv_missing_directory_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("out.csv");

        let result = write_csv(&path, &Table::default());
        assert!(matches!(result, Err(SheetcastError::Write { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_csv_full_device_error_names_path() {
        let path = Path::new("/dev/full");
        let mut table = Table::new(vec!["name".to_string()]);
        table.push_row(vec![CellValue::from("alpha")]);

        match write_csv(path, &table) {
            Err(SheetcastError::Write { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Write error, got {:?}", other),
        }
    }
}
