//! Workbook → CSV conversion
//!
//! Opens one workbook, walks its sheets in workbook order and writes each
//! sheet to its own BOM-prefixed UTF-8 CSV file:
//!
//! - one sheet:   `{output_dir}/{base}.csv`
//! - many sheets: `{output_dir}/{base}_{sheet}.csv` (`/` and `\` → `_`)
//!
//! Sheets already written stay on disk when a later sheet fails.

mod target;

pub use target::{base_name, default_output_dir, sanitize_sheet_name, OutputNaming};

use crate::error::{SheetcastError, SheetcastResult};
use crate::excel::WorkbookReader;
use crate::writer::write_csv;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Target directory; defaults to the workbook's directory
    pub output_dir: Option<PathBuf>,
    /// Convert every sheet, or stop after the first one
    pub all_sheets: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            all_sheets: true,
        }
    }
}

impl ConvertOptions {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn first_sheet_only(mut self) -> Self {
        self.all_sheets = false;
        self
    }
}

/// One sheet written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSheet {
    pub sheet_name: String,
    pub path: PathBuf,
    /// Data rows, header excluded
    pub rows: usize,
    pub columns: usize,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub workbook: PathBuf,
    pub output_dir: PathBuf,
    pub sheets: Vec<ConvertedSheet>,
}

impl Conversion {
    /// Produced files, in sheet order
    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.sheets.iter().map(|s| s.path.clone()).collect()
    }
}

pub type ConversionResult = SheetcastResult<Conversion>;

/// Progress callbacks for a conversion run
///
/// All methods default to no-ops; `()` is the silent observer.
pub trait ConversionObserver {
    fn workbook_opened(&mut self, _workbook: &Path, _sheet_names: &[String]) {}

    fn sheet_converted(&mut self, _sheet: &ConvertedSheet) {}

    fn finished(&mut self, _conversion: &Conversion) {}
}

impl ConversionObserver for () {}

/// Convert a workbook without progress reporting
pub fn convert<P: AsRef<Path>>(workbook_path: P, options: &ConvertOptions) -> ConversionResult {
    convert_with(workbook_path, options, &mut ())
}

/// Convert a workbook, reporting progress to `observer`
pub fn convert_with<P, O>(
    workbook_path: P,
    options: &ConvertOptions,
    observer: &mut O,
) -> ConversionResult
where
    P: AsRef<Path>,
    O: ConversionObserver + ?Sized,
{
    let workbook_path = workbook_path.as_ref();

    // Checked before anything is created on disk
    if !workbook_path.exists() {
        return Err(SheetcastError::NotFound(workbook_path.to_path_buf()));
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(workbook_path));
    fs::create_dir_all(&output_dir).map_err(|e| SheetcastError::write(&output_dir, e))?;

    let mut reader = WorkbookReader::open(workbook_path)?;
    let sheet_names = reader.sheet_names();
    info!(
        workbook = %workbook_path.display(),
        sheets = sheet_names.len(),
        "opened workbook"
    );
    observer.workbook_opened(workbook_path, &sheet_names);

    let naming = OutputNaming::new(&output_dir, base_name(workbook_path), sheet_names.len());
    let mut conversion = Conversion {
        workbook: workbook_path.to_path_buf(),
        output_dir,
        sheets: Vec::new(),
    };

    for sheet_name in &sheet_names {
        let sheet = reader.read_sheet(sheet_name)?;
        let path = naming.path_for(&sheet.name);
        debug!(sheet = %sheet.name, path = %path.display(), "writing sheet");

        write_csv(&path, &sheet.table)?;

        let converted = ConvertedSheet {
            sheet_name: sheet.name,
            path,
            rows: sheet.table.row_count(),
            columns: sheet.table.column_count(),
        };
        info!(
            sheet = %converted.sheet_name,
            rows = converted.rows,
            columns = converted.columns,
            "converted sheet"
        );
        observer.sheet_converted(&converted);
        conversion.sheets.push(converted);

        if !options.all_sheets {
            break;
        }
    }

    observer.finished(&conversion);
    Ok(conversion)
}
