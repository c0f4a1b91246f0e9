//! CLI command handlers

pub mod commands;
pub mod interactive;

pub use commands::{convert, profile, ConsoleReporter};

use crate::error::SheetcastResult;
use std::io;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber (`RUST_LOG` overrides the default level)
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "royalbit_sheetcast=debug"
    } else {
        "royalbit_sheetcast=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

/// Execute the interactive prompt flow, then convert
pub fn run_interactive(verbose: bool) -> SheetcastResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    interactive::write_usage(&mut out)?;
    let answers = interactive::prompt_convert(&mut input, &mut out)?;
    println!();

    convert(
        answers.workbook,
        answers.options.output_dir,
        !answers.options.all_sheets,
        verbose,
    )?;
    Ok(())
}
