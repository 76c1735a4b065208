use anyhow::{Context, Result};
use capital_gains::cli::{runner, Cli};
use capital_gains::config;
use capital_gains::tax::BatchProcessor;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let policy = config::resolve_policy(cli.config.as_deref(), cli.policy_overrides())?;
    let processor = BatchProcessor::new(policy);

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            info!("Reading operations from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let summary = runner::run(input, &mut stdout, &mut stderr, &processor, cli.format)?;

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
