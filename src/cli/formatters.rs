//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of tax calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::error::{CapitalGainsError, Result};
use crate::tax::ProcessedOperation;
use crate::wire;

/// Format a processed batch as the JSON result line
pub fn format_batch_json(processed: &[ProcessedOperation]) -> Result<String> {
    let results: Vec<_> = processed.iter().map(|p| p.result).collect();
    Ok(wire::format_results(&results)?)
}

/// Format a processed batch as a table with the position after each operation
pub fn format_batch_table(
    batch_number: usize,
    processed: &[ProcessedOperation],
) -> Result<String> {
    #[derive(Tabled)]
    struct OperationRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Operation")]
        operation: String,
        #[tabled(rename = "Unit Cost")]
        unit_cost: String,
        #[tabled(rename = "Quantity")]
        quantity: u64,
        #[tabled(rename = "Tax")]
        tax: String,
        #[tabled(rename = "Held")]
        held: u64,
        #[tabled(rename = "Avg Cost")]
        avg_cost: String,
        #[tabled(rename = "Carried Loss")]
        loss: String,
    }

    let mut output = format!("{} Batch {}\n", "▶".blue().bold(), batch_number);

    if processed.is_empty() {
        output.push_str("  (no operations)\n");
        return Ok(output);
    }

    let rows: Vec<OperationRow> = processed
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let tax = if p.result.tax > Decimal::ZERO {
                format!("{:.2}", p.result.tax).yellow().to_string()
            } else {
                format!("{:.2}", p.result.tax)
            };

            let loss = p.position.accumulated_loss();
            let loss = if loss > Decimal::ZERO {
                format!("{:.2}", loss).red().to_string()
            } else {
                format!("{:.2}", loss)
            };

            OperationRow {
                index: i + 1,
                operation: p.operation.kind.as_str().to_uppercase(),
                unit_cost: format!("{:.2}", p.operation.unit_cost),
                quantity: p.operation.quantity,
                tax,
                held: p.position.quantity_held(),
                avg_cost: format!("{:.2}", p.position.average_cost()),
                loss,
            }
        })
        .collect();

    let total_tax = processed
        .iter()
        .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.result.tax))
        .ok_or(CapitalGainsError::Overflow("total tax"))?;

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    // Right-align everything after # and Operation
    table.modify(Columns::new(2..), Alignment::right());

    output.push_str(&table.to_string());
    output.push_str(&format!("\n{:<12} {:.2}\n", "Total tax:".bold(), total_tax));

    Ok(output)
}

/// Format the diagnostic for a rejected input line
pub fn format_line_error(line_number: usize, error: &anyhow::Error) -> String {
    format!("{} line {}: {:#}", "✗".red().bold(), line_number, error)
}
