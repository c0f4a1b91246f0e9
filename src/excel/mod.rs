//! Workbook access
//!
//! Reading goes through calamine, so every format it auto-detects
//! (xlsx, xlsm, xlsb, xls, ods) is accepted.

mod reader;

pub use reader::WorkbookReader;
