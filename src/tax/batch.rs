use tracing::{debug, info};

use super::cost_basis::PositionState;
use super::handlers::{handle_buy, handle_sell};
use super::swing_trade::{TaxCalculator, TaxPolicy};
use crate::error::CapitalGainsError;
use crate::models::{Operation, OperationKind, TaxResult};

/// One processed operation with the position it left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOperation {
    pub operation: Operation,
    pub result: TaxResult,
    pub position: PositionState,
}

/// Processes one investor's operations in order against a fresh position
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    calculator: TaxCalculator,
}

impl BatchProcessor {
    pub fn new(policy: TaxPolicy) -> Self {
        Self {
            calculator: TaxCalculator::new(policy),
        }
    }

    pub fn policy(&self) -> &TaxPolicy {
        self.calculator.policy()
    }

    /// One tax result per operation, same order as the input
    pub fn process(&self, operations: &[Operation]) -> Result<Vec<TaxResult>, CapitalGainsError> {
        Ok(self
            .process_detailed(operations)?
            .into_iter()
            .map(|processed| processed.result)
            .collect())
    }

    /// Like [`BatchProcessor::process`], keeping a snapshot of the position after each operation
    pub fn process_detailed(
        &self,
        operations: &[Operation],
    ) -> Result<Vec<ProcessedOperation>, CapitalGainsError> {
        let mut position = PositionState::new();
        let mut processed = Vec::with_capacity(operations.len());

        for (index, operation) in operations.iter().enumerate() {
            let result = match operation.kind {
                OperationKind::Buy => handle_buy(operation, &mut position),
                OperationKind::Sell => handle_sell(&self.calculator, operation, &mut position),
            }
            .inspect_err(|e| debug!(index, error = %e, "operation rejected"))?;

            processed.push(ProcessedOperation {
                operation: operation.clone(),
                result,
                position: position.clone(),
            });
        }

        info!(
            operations = processed.len(),
            quantity_held = position.quantity_held(),
            accumulated_loss = %position.accumulated_loss(),
            "batch processed"
        );

        Ok(processed)
    }
}
