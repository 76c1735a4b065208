use tracing::debug;

use super::cost_basis::PositionState;
use super::loss_carryforward::{settle_sale, RealizedResult};
use super::swing_trade::TaxCalculator;
use crate::error::CapitalGainsError;
use crate::models::{Operation, TaxResult};

/// Apply a purchase to the position. Buying is never taxable.
pub fn handle_buy(
    operation: &Operation,
    position: &mut PositionState,
) -> Result<TaxResult, CapitalGainsError> {
    position.add_purchase(operation.unit_cost, operation.quantity)?;

    debug!(
        unit_cost = %operation.unit_cost,
        quantity = operation.quantity,
        average_cost = %position.average_cost(),
        quantity_held = position.quantity_held(),
        "buy applied"
    );

    Ok(TaxResult::zero())
}

/// Apply a sale to the position and return the tax due on it.
///
/// The tax is computed against the position as it was before the sale; the
/// held quantity and the carried loss are updated afterwards. Selling more
/// than is held, or a sale whose value overflows, fails without touching the
/// position.
pub fn handle_sell(
    calculator: &TaxCalculator,
    operation: &Operation,
    position: &mut PositionState,
) -> Result<TaxResult, CapitalGainsError> {
    if operation.quantity > position.quantity_held() {
        return Err(CapitalGainsError::Oversell {
            requested: operation.quantity,
            held: position.quantity_held(),
        });
    }

    let tax = calculator.compute(
        operation.unit_cost,
        position.average_cost(),
        position.accumulated_loss(),
        operation.quantity,
    )?;
    let realized = RealizedResult::of_sale(
        operation.unit_cost,
        position.average_cost(),
        operation.quantity,
    )?;

    let mut settled = position.clone();
    settled.remove_quantity(operation.quantity);
    settle_sale(&mut settled, realized)?;
    *position = settled;

    debug!(
        unit_cost = %operation.unit_cost,
        quantity = operation.quantity,
        ?realized,
        %tax,
        accumulated_loss = %position.accumulated_loss(),
        quantity_held = position.quantity_held(),
        "sell applied"
    );

    Ok(TaxResult::new(tax))
}
