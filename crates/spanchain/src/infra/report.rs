//! Console report
//!
//! Writes the elapsed time of an expansion followed by one line per
//! interval, in append order.

use std::io::{self, Write};

use thiserror::Error;

use crate::app::expander::Expansion;
use crate::domain::interval::Interval;

/// Report output errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Underlying writer failed
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Report layout options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print one line per interval after the summary line
    pub list_intervals: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            list_intervals: true,
        }
    }
}

/// Write the summary line and the interval listing
pub fn write_report<W: Write>(writer: &mut W, expansion: &Expansion) -> Result<(), ReportError> {
    write_report_with(writer, expansion, ReportOptions::default())
}

/// Write the report with explicit layout options
pub fn write_report_with<W: Write>(
    writer: &mut W,
    expansion: &Expansion,
    options: ReportOptions,
) -> Result<(), ReportError> {
    writeln!(
        writer,
        "Time: {}ms   # of Combos: {}",
        expansion.stats.elapsed.as_millis(),
        expansion.len()
    )?;

    if options.list_intervals {
        for interval in &expansion.intervals {
            write_interval_line(writer, interval)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write a single `id / start / end` line
fn write_interval_line<W: Write>(writer: &mut W, interval: &Interval) -> io::Result<()> {
    writeln!(
        writer,
        "  id:  {}  start:  {}  end:  {}",
        interval.id(),
        interval.start(),
        interval.end()
    )
}
