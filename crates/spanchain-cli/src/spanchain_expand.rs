//! Interval chain closure CLI
//!
//! Usage: spanchain_expand [options]
//!
//! Options:
//!   --strategy <grouped|scan>  Closure strategy (default: grouped)
//!   --separator <STR>          Separator between composite ids (default: +)
//!   --audit                    Verify the closure properties of the result
//!   --quiet, -q                Print the summary line only
//!   -v                         Increase log verbosity (repeatable)
//!
//! Example: spanchain_expand --strategy scan --audit

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use spanchain::domain::fixture::reference_intervals;
use spanchain::infra::report::{ReportOptions, write_report_with};
use spanchain::{
    COMPOSITE_SEPARATOR, ExpandOptions, REFERENCE_COMBO_COUNT, Strategy, audit, expand_with,
};

/// Expand the reference interval fixture into its end-to-start chain closure
#[derive(Debug, Parser)]
#[command(name = "spanchain_expand", version, about)]
struct Args {
    /// Closure strategy
    #[arg(long, value_enum, default_value = "grouped")]
    strategy: StrategyArg,

    /// Separator placed between constituent ids of a composite
    #[arg(long, default_value = COMPOSITE_SEPARATOR)]
    separator: String,

    /// Verify the closure properties of the result
    #[arg(long)]
    audit: bool,

    /// Print the summary line only
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Start-coordinate index plus worklist
    Grouped,
    /// Double-index scan over the growing collection
    Scan,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Grouped => Strategy::Grouped,
            StrategyArg::Scan => Strategy::Scan,
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn run(args: &Args) -> Result<()> {
    let sources = reference_intervals();
    let options = ExpandOptions {
        strategy: args.strategy.into(),
        separator: args.separator.clone(),
    };

    log::info!(
        "Expanding {} reference intervals with {:?} strategy",
        sources.len(),
        options.strategy
    );

    let expansion = expand_with(&sources, &options);

    if expansion.len() != REFERENCE_COMBO_COUNT {
        log::warn!(
            "Closure has {} intervals, expected {}",
            expansion.len(),
            REFERENCE_COMBO_COUNT
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report_options = ReportOptions {
        list_intervals: !args.quiet,
    };
    write_report_with(&mut out, &expansion, report_options).context("writing report")?;

    if args.audit {
        let summary = audit(&sources, &expansion, &options.separator)
            .context("closure audit failed")?;
        writeln!(
            out,
            "Audit passed: {} intervals ({} sources, {} composites, {} distinct spans)",
            summary.intervals, summary.sources, summary.composites, summary.spans
        )
        .context("writing audit summary")?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("Arguments: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
