//! Output file naming

use std::path::{Path, PathBuf};

/// Replace path separators so a sheet name is safe inside a file name
pub fn sanitize_sheet_name(sheet_name: &str) -> String {
    sheet_name.replace(['/', '\\'], "_")
}

/// File name without its extension (`data.xlsx` → `data`)
pub fn base_name(workbook_path: &Path) -> String {
    workbook_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directory holding the workbook, `.` for a bare file name
pub fn default_output_dir(workbook_path: &Path) -> PathBuf {
    match workbook_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Derives one CSV path per sheet for a single conversion run
///
/// A workbook with exactly one sheet maps to `{base}.csv` whatever that sheet
/// is called; otherwise every sheet maps to `{base}_{sheet}.csv`.
#[derive(Debug, Clone)]
pub struct OutputNaming {
    output_dir: PathBuf,
    base_name: String,
    sheet_count: usize,
}

impl OutputNaming {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        sheet_count: usize,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: base_name.into(),
            sheet_count,
        }
    }

    pub fn path_for(&self, sheet_name: &str) -> PathBuf {
        let file_name = if self.sheet_count == 1 {
            format!("{}.csv", self.base_name)
        } else {
            format!("{}_{}.csv", self.base_name, sanitize_sheet_name(sheet_name))
        };
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Sheet 1"), "Sheet 1");
        assert_eq!(sanitize_sheet_name("Sheet/2"), "Sheet_2");
        assert_eq!(sanitize_sheet_name("a\\b/c"), "a_b_c");
    }

    #[test]
    fn test_base_name_strips_extension() {
        assert_eq!(base_name(Path::new("data.xlsx")), "data");
        assert_eq!(base_name(Path::new("dir/report.final.xls")), "report.final");
        assert_eq!(base_name(Path::new("/tmp/noext")), "noext");
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(default_output_dir(Path::new("data.xlsx")), PathBuf::from("."));
        assert_eq!(
            default_output_dir(Path::new("in/sub/data.xlsx")),
            PathBuf::from("in/sub")
        );
    }

    #[test]
    fn test_single_sheet_has_no_suffix() {
        let naming = OutputNaming::new("out", "data", 1);
        assert_eq!(naming.path_for("Anything"), PathBuf::from("out/data.csv"));
        assert_eq!(naming.path_for("data"), PathBuf::from("out/data.csv"));
    }

    #[test]
    fn test_multi_sheet_suffixes_sanitized_names() {
        let naming = OutputNaming::new("out", "data", 2);
        assert_eq!(
            naming.path_for("Sheet 1"),
            PathBuf::from("out/data_Sheet 1.csv")
        );
        assert_eq!(
            naming.path_for("Sheet/2"),
            PathBuf::from("out/data_Sheet_2.csv")
        );
    }
}
