//! Sheetcast - workbook sheets to CSV files
//!
//! Converts every sheet of a workbook (xlsx, xlsm, xlsb, xls, ods) into its
//! own BOM-prefixed UTF-8 CSV file with a deterministic name, and ships a
//! small categorical profile report over CSV tables.
//!
//! # Example
//!
//! ```no_run
//! use royalbit_sheetcast::converter::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::default().with_output_dir("csv_out");
//! let conversion = convert("data.xlsx", &options)?;
//!
//! for path in conversion.output_paths() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), royalbit_sheetcast::error::SheetcastError>(())
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod excel;
pub mod parser;
pub mod profile;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use converter::{convert, Conversion, ConversionResult, ConvertOptions};
pub use error::{SheetcastError, SheetcastResult};
pub use types::{CellValue, Sheet, Table};
