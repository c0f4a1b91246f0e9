use std::path::PathBuf;
use thiserror::Error;

pub type SheetcastResult<T> = Result<T, SheetcastError>;

#[derive(Error, Debug)]
pub enum SheetcastError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No workbook specified")]
    NoInput,

    #[error("Failed to open workbook {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Chart export error: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetcastError {
    /// Wrap an IO failure with the path it happened on
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SheetcastError::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_path() {
        let err = SheetcastError::NotFound(PathBuf::from("missing.xlsx"));
        assert_eq!(err.to_string(), "File not found: missing.xlsx");
    }

    #[test]
    fn test_missing_column_lists_available() {
        let err = SheetcastError::MissingColumn {
            column: "produto".to_string(),
            available: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column 'produto' not found (available: a, b)"
        );
    }

    #[test]
    fn test_write_error_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SheetcastError::write("out/data.csv", io);
        assert!(err.to_string().contains("out/data.csv"));
        assert!(err.source().is_some());
    }
}
