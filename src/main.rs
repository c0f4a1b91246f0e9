use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_sheetcast::cli;
use royalbit_sheetcast::profile::ProfileConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sheetcast")]
#[command(about = "Convert workbook sheets to CSV files.")]
#[command(long_about = "Sheetcast - workbook sheets to CSV files
xlsx | xlsm | xlsb | xls | ods  →  UTF-8 CSV (with BOM)

COMMANDS:
  convert   - Write every sheet (or only the first) to its own CSV file
  profile   - Category profile of a CSV table (counts, shares, cross-tab)

Run without arguments for interactive mode.

EXAMPLES:
  sheetcast convert data.xlsx                   # CSVs next to data.xlsx
  sheetcast convert data.xlsx csv_output        # CSVs in csv_output/
  sheetcast convert data.xlsx . --first-only    # first sheet only
  sheetcast profile base.csv --filter-value Polpa")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert a workbook to CSV files, one per sheet.

NAMING:
  One sheet:     <output_dir>/<name>.csv
  Several:       <output_dir>/<name>_<sheet>.csv
  '/' and '\\' in sheet names are replaced with '_'.

The first row of each sheet is the header. Files are UTF-8 with a
byte-order mark so spreadsheet tools pick up the encoding.

EXAMPLES:
  sheetcast convert data.xlsx
  sheetcast convert data.xlsx csv_output
  sheetcast convert data.xlsx . --first-only")]
    /// Convert workbook sheets to CSV files
    Convert {
        /// Path to the workbook
        input: PathBuf,

        /// Output directory (default: the workbook's directory)
        output_dir: Option<PathBuf>,

        /// Convert only the first sheet
        #[arg(long, alias = "first")]
        first_only: bool,
    },

    #[command(long_about = "Profile one category of a CSV table.

Keeps the rows where --filter-column equals --filter-value, then reports
value counts and shares for two columns, the rows matching both focus
values, and a cross-tabulation with 'All' margins.

OUTPUT:
  <output_dir>/crosstab_<slug>.csv   cross-tabulation (UTF-8 with BOM)
  <output_dir>/chart_<slug>.xlsx     distributions + column charts")]
    /// Category profile report over a CSV table
    Profile {
        /// Path to the CSV file
        input: PathBuf,

        /// Column used to select rows
        #[arg(long)]
        filter_column: Option<String>,

        /// Value the filter column must equal
        #[arg(long)]
        filter_value: Option<String>,

        /// First categorical column to profile
        #[arg(long)]
        primary_column: Option<String>,

        /// Second categorical column to profile
        #[arg(long)]
        secondary_column: Option<String>,

        /// Primary value highlighted in the summary
        #[arg(long)]
        primary_focus: Option<String>,

        /// Secondary value highlighted in the summary
        #[arg(long)]
        secondary_focus: Option<String>,

        /// Directory for the generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Stem used in generated file names
        #[arg(long)]
        slug: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let result = match cli.command {
        None => cli::run_interactive(cli.verbose),

        Some(Commands::Convert {
            input,
            output_dir,
            first_only,
        }) => cli::convert(input, output_dir, first_only, cli.verbose).map(|_| ()),

        Some(Commands::Profile {
            input,
            filter_column,
            filter_value,
            primary_column,
            secondary_column,
            primary_focus,
            secondary_focus,
            output_dir,
            slug,
        }) => {
            let defaults = ProfileConfig::default();
            let config = ProfileConfig {
                filter_column: filter_column.unwrap_or(defaults.filter_column),
                filter_value: filter_value.unwrap_or(defaults.filter_value),
                primary_column: primary_column.unwrap_or(defaults.primary_column),
                secondary_column: secondary_column.unwrap_or(defaults.secondary_column),
                primary_focus: primary_focus.unwrap_or(defaults.primary_focus),
                secondary_focus: secondary_focus.unwrap_or(defaults.secondary_focus),
                output_dir: output_dir.unwrap_or(defaults.output_dir),
                slug: slug.unwrap_or(defaults.slug),
            };
            cli::profile(input, config, cli.verbose)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
