use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::PolicyOverrides;

pub mod formatters;
pub mod runner;

#[derive(Parser, Debug)]
#[command(name = "capital-gains")]
#[command(
    version,
    about = "Capital gains tax calculator for stock buy/sell operations"
)]
#[command(
    long_about = "Reads one JSON array of operations per line and prints, for each line, the tax owed on every operation using weighted average cost, a minimum taxable operation value and loss carryforward. An empty line or end of input stops processing."
)]
pub struct Cli {
    /// Read operations from this file instead of stdin
    pub input: Option<PathBuf>,

    /// Tax rate applied to taxable profit (0 to 1, default 0.20)
    #[arg(long, value_name = "RATE")]
    pub rate: Option<Decimal>,

    /// Sales totalling less than this value are exempt (default 20000)
    #[arg(long = "minimum-taxable-value", value_name = "VALUE")]
    pub minimum_taxable_value: Option<Decimal>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    pub fn policy_overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            rate: self.rate,
            minimum_taxable_operation_value: self.minimum_taxable_value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON array of `{"tax": ...}` per input line
    Json,
    /// A table per input line with the position after each operation
    Table,
}
