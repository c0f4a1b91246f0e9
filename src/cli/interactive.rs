//! Prompt-driven conversion when no arguments are given

use crate::converter::ConvertOptions;
use crate::error::{SheetcastError, SheetcastResult};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Inputs collected from the prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAnswers {
    pub workbook: PathBuf,
    pub options: ConvertOptions,
}

/// Usage banner shown before prompting
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "{}", rule)?;
    writeln!(out, "Workbook to CSV converter")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nUsage:")?;
    writeln!(out, "  sheetcast convert <workbook> [output_dir] [--first-only]")?;
    writeln!(out, "\nExamples:")?;
    writeln!(out, "  sheetcast convert data.xlsx")?;
    writeln!(out, "  sheetcast convert data.xlsx csv_output")?;
    writeln!(out, "  sheetcast convert data.xlsx . --first-only")?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

/// Ask for workbook path, output directory and whether to convert every sheet
///
/// An empty workbook path is an error; an empty output directory keeps the
/// default; anything but `n` converts every sheet.
pub fn prompt_convert<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> SheetcastResult<PromptAnswers> {
    let workbook = ask(input, out, "\nWorkbook path: ")?;
    if workbook.is_empty() {
        return Err(SheetcastError::NoInput);
    }

    let output_dir = ask(input, out, "Output directory (Enter for the workbook's folder): ")?;
    let all_sheets = ask(input, out, "Convert all sheets? (Y/n): ")?.to_lowercase() != "n";

    Ok(PromptAnswers {
        workbook: PathBuf::from(workbook),
        options: ConvertOptions {
            output_dir: (!output_dir.is_empty()).then(|| PathBuf::from(output_dir)),
            all_sheets,
        },
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(clean_answer(&line))
}

/// Trim whitespace and surrounding quotes (drag-and-drop paths arrive quoted)
fn clean_answer(line: &str) -> String {
    line.trim().trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answers(script: &str) -> SheetcastResult<PromptAnswers> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        prompt_convert(&mut input, &mut out)
    }

    #[test]
    fn test_defaults_when_only_path_given() {
        let result = answers("data.xlsx\n\n\n").unwrap();
        assert_eq!(result.workbook, PathBuf::from("data.xlsx"));
        assert_eq!(result.options, ConvertOptions::default());
    }

    #[test]
    fn test_quoted_path_and_output_dir() {
        let result = answers("  \"My Files/data.xlsx\"  \n\"out dir\"\ny\n").unwrap();
        assert_eq!(result.workbook, PathBuf::from("My Files/data.xlsx"));
        assert_eq!(result.options.output_dir, Some(PathBuf::from("out dir")));
        assert!(result.options.all_sheets);
    }

    #[test]
    fn test_answer_n_means_first_sheet_only() {
        assert!(!answers("a.xlsx\n\nn\n").unwrap().options.all_sheets);
        assert!(!answers("a.xlsx\n\n N \n").unwrap().options.all_sheets);
        assert!(answers("a.xlsx\n\nno\n").unwrap().options.all_sheets);
    }

    #[test]
    fn test_matches_flag_options() {
        let prompted = answers("a.xlsx\nout\nn\n").unwrap().options;
        let flagged = ConvertOptions::default()
            .with_output_dir("out")
            .first_sheet_only();
        assert_eq!(prompted, flagged);
    }

    #[test]
    fn test_empty_path_is_error() {
        assert!(matches!(answers("\n"), Err(SheetcastError::NoInput)));
        assert!(matches!(answers(""), Err(SheetcastError::NoInput)));
    }

    #[test]
    fn test_usage_mentions_first_only() {
        let mut out = Vec::new();
        write_usage(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--first-only"));
    }
}
