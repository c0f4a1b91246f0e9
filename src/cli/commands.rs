use crate::converter::{self, Conversion, ConversionObserver, ConvertOptions, ConvertedSheet};
use crate::error::SheetcastResult;
use crate::parser;
use crate::profile::{CrossTab, Distribution, ProfileConfig, ProfileReport};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Format a percentage with two decimals (`12.5` → `12.50%`)
fn format_percent(p: f64) -> String {
    format!("{:.2}%", p)
}

/// Console progress for a conversion run
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

fn sheets_found_line(sheet_names: &[String]) -> String {
    format!(
        "   Found {} sheet(s): {}",
        sheet_names.len(),
        sheet_names.join(", ").bright_blue()
    )
}

fn sheet_written_line(sheet: &ConvertedSheet) -> String {
    format!(
        "   {} {} ({} rows, {} columns)",
        "✅".green(),
        sheet.path.display(),
        sheet.rows,
        sheet.columns
    )
}

fn conversion_complete_line(conversion: &Conversion) -> String {
    format!(
        "✅ Conversion complete! {} CSV file(s) created.",
        conversion.sheets.len()
    )
    .bold()
    .green()
    .to_string()
}

impl ConversionObserver for ConsoleReporter {
    fn workbook_opened(&mut self, _workbook: &Path, sheet_names: &[String]) {
        println!("{}", sheets_found_line(sheet_names));
        if self.verbose {
            println!("{}", "💾 Writing CSV files...".cyan());
        }
        println!();
    }

    fn sheet_converted(&mut self, sheet: &ConvertedSheet) {
        println!("{}", sheet_written_line(sheet));
        if self.verbose {
            println!("      from sheet: {}", sheet.sheet_name);
        }
    }

    fn finished(&mut self, conversion: &Conversion) {
        println!();
        println!("{}", conversion_complete_line(conversion));
        if self.verbose {
            println!("   Output directory: {}", conversion.output_dir.display());
        }
    }
}

/// Execute the convert command
pub fn convert(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    first_only: bool,
    verbose: bool,
) -> SheetcastResult<Conversion> {
    println!("{}", "📄 Sheetcast - Workbook to CSV".bold().green());
    println!("   Input:  {}", input.display());
    if let Some(ref dir) = output_dir {
        println!("   Output: {}", dir.display());
    }
    if first_only {
        println!("   Mode:   {}", "first sheet only".bright_yellow());
    }
    println!();

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let options = ConvertOptions {
        output_dir,
        all_sheets: !first_only,
    };
    let mut reporter = ConsoleReporter::new(verbose);
    converter::convert_with(&input, &options, &mut reporter)
}

/// Execute the profile command
pub fn profile(input: PathBuf, config: ProfileConfig, verbose: bool) -> SheetcastResult<()> {
    println!("{}", "=".repeat(70));
    println!(
        "{}",
        format!("PROFILE: {}", config.filter_value.to_uppercase()).bold()
    );
    println!("{}", "=".repeat(70));

    if verbose {
        println!("{}", format!("📖 Reading {}...", input.display()).cyan());
    }
    let table = parser::read_csv(&input)?;
    if verbose {
        println!(
            "   {} rows, filtering on {} = {}",
            table.row_count(),
            config.filter_column,
            config.filter_value
        );
    }

    let report = ProfileReport::build(&table, &config)?;
    println!("\nTotal records: {}\n", report.total_rows);

    print_section(&format!("1. {}", config.primary_column.to_uppercase()));
    print_distribution(&report.primary, &config.primary_focus);

    print_section(&format!("2. {}", config.secondary_column.to_uppercase()));
    print_distribution(&report.secondary, &config.secondary_focus);

    print_section("3. COMBINED");
    println!(
        "\nRecords {} AND {}: {} ({})",
        config.primary_focus,
        config.secondary_focus,
        report.combined_count,
        format_percent(report.combined_percent)
    );
    println!(
        "\nCross-tabulation ({} x {}):",
        config.primary_column, config.secondary_column
    );
    print_crosstab(&report.crosstab);

    let (crosstab_path, chart_path) = report.write_outputs(&config)?;
    println!("\n>>> Cross-tabulation saved: {}", crosstab_path.display());
    println!(">>> Chart saved: {}", chart_path.display());

    println!("\n{}", "=".repeat(70));
    println!("{}", "SUMMARY".bold());
    println!("{}", "=".repeat(70));
    println!("\nRecords analyzed: {}", report.total_rows);
    if let Some(p) = report.primary.percent_of(&config.primary_focus) {
        println!("{} share: {}", config.primary_focus, format_percent(p));
    }
    if let Some(p) = report.secondary.percent_of(&config.secondary_focus) {
        println!("{} share: {}", config.secondary_focus, format_percent(p));
    }
    println!(
        "{} AND {} share: {}",
        config.primary_focus,
        config.secondary_focus,
        format_percent(report.combined_percent)
    );
    println!("{}", "=".repeat(70));

    Ok(())
}

fn print_section(title: &str) {
    println!("{}", "-".repeat(70));
    println!("{}", title.bold().cyan());
    println!("{}", "-".repeat(70));
}

fn print_distribution(distribution: &Distribution, focus: &str) {
    println!("\nDistribution:");
    for entry in &distribution.entries {
        println!(
            "  {}: {} records ({})",
            entry.value,
            entry.count,
            format_percent(entry.percent)
        );
    }

    match distribution.percent_of(focus) {
        Some(p) => println!(
            "\n{} {} of records are {}\n",
            ">>>".bold(),
            format_percent(p).bright_yellow().bold(),
            focus
        ),
        None => println!("\n{} No {} records found\n", ">>>".bold(), focus),
    }
}

/// Render a cross-tab as aligned text, margins included
fn crosstab_lines(crosstab: &CrossTab) -> Vec<String> {
    let table = crosstab.to_table();
    let widths: Vec<usize> = (0..table.column_count())
        .map(|ci| {
            table
                .rows
                .iter()
                .map(|row| row[ci].to_string().chars().count())
                .chain(std::iter::once(table.columns[ci].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(ci, (cell, &width))| {
                if ci == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(table.columns.clone())];
    for row in &table.rows {
        lines.push(render(row.iter().map(|c| c.to_string()).collect()));
    }
    lines
}

fn print_crosstab(crosstab: &CrossTab) {
    let lines = crosstab_lines(crosstab);
    let margin_row = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        if i == margin_row {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
