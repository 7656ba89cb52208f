//! ttmaker CLI Binary
//!
//! Command-line interface for generating deterministic test trees.

use anyhow::Context;
use clap::Parser;
use std::io::{BufWriter, Write};
use std::process;
use ttmaker::logging::init_logging;
use ttmaker::tooling::cli::{Cli, CliContext};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context = CliContext::new(cli.settings.clone())
        .context("Failed to load settings")?
        .with_signal_handling(true);

    let logging = cli.logging_config(&context.settings().logging);
    init_logging(Some(&logging)).context("Failed to initialize logging")?;

    let stdout = std::io::stdout();
    let mut report = BufWriter::new(stdout.lock());
    let output = context.execute(&cli.command, &mut report)?;
    writeln!(report, "{}", output)?;
    report.flush()?;
    Ok(())
}
