use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::cli::formatters::{format_batch_json, format_batch_table, format_line_error};
use crate::cli::OutputFormat;
use crate::tax::BatchProcessor;
use crate::wire;

/// Counts of processed and rejected input lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Process every batch line of `input` until an empty line or end of input.
///
/// Results go to `output`, one rendering per successful line. A line that
/// cannot be decoded, parsed or processed is reported on `diagnostics` and the
/// loop moves on to the next line. Only a failing read or write aborts.
pub fn run<R, W, E>(
    input: R,
    output: &mut W,
    diagnostics: &mut E,
    processor: &BatchProcessor,
    format: OutputFormat,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;

        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                let err = anyhow::Error::new(e).context("line is not valid UTF-8");
                report_failure(diagnostics, &mut summary, line_number, &err)?;
                continue;
            }
            Err(e) => return Err(e).context("failed to read input"),
        };

        if line.trim().is_empty() {
            break;
        }

        match process_line(&line, line_number, processor, format) {
            Ok(rendered) => {
                summary.batches += 1;
                writeln!(output, "{}", rendered).context("failed to write output")?;
            }
            Err(err) => report_failure(diagnostics, &mut summary, line_number, &err)?,
        }
    }

    output.flush().context("failed to write output")?;

    info!(
        batches = summary.batches,
        failed = summary.failed,
        "input processed"
    );

    Ok(summary)
}

fn process_line(
    line: &str,
    line_number: usize,
    processor: &BatchProcessor,
    format: OutputFormat,
) -> Result<String> {
    let operations = wire::parse_batch(line).context("invalid operations")?;
    let processed = processor
        .process_detailed(&operations)
        .context("batch rejected")?;

    match format {
        OutputFormat::Json => format_batch_json(&processed),
        OutputFormat::Table => format_batch_table(line_number, &processed),
    }
}

fn report_failure<E: Write>(
    diagnostics: &mut E,
    summary: &mut RunSummary,
    line_number: usize,
    err: &anyhow::Error,
) -> Result<()> {
    warn!(line = line_number, "skipping input line: {:#}", err);
    summary.failed += 1;
    writeln!(diagnostics, "{}", format_line_error(line_number, err))
        .context("failed to write diagnostics")
}
