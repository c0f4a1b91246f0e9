use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell, typed the way the workbook stored it
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// Date/time already rendered as `YYYY-MM-DD HH:MM:SS` (`YYYY-MM-DD` in
    /// date-only columns)
    DateTime(String),
    /// Excel error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Check if the cell holds no value (empty cell or empty string)
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Get the cell as text, `None` for empty cells
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Int(i) => write!(f, "{}", i),
            // f64 Display is the shortest round-trip form; 1.0 renders as "1"
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::DateTime(s) => f.write_str(s),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

//==============================================================================
// Tables
//==============================================================================

/// Header row plus data rows, each row aligned with `columns`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Keep only rows whose `column` renders exactly as `value`
    pub fn filter_eq(&self, column: &str, value: &str) -> Option<Table> {
        let idx = self.column_index(column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row[idx].to_string() == value)
            .cloned()
            .collect();
        Some(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}

//==============================================================================
// Workbook Sheets
//==============================================================================

/// One named table from a workbook
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

impl Sheet {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}
