use rust_decimal::Decimal;

use super::cost_basis::PositionState;
use crate::error::CapitalGainsError;

/// Outcome of a sale measured against the average cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealizedResult {
    /// Sold at or above average cost
    Profit(Decimal),
    /// Sold below average cost
    Loss(Decimal),
}

impl RealizedResult {
    /// Classify a sale of `quantity` shares at `sell_price` against `average_cost`.
    ///
    /// This is the single place where "is this a loss" is decided, so the tax
    /// computation and the carryforward bookkeeping always agree.
    pub fn of_sale(
        sell_price: Decimal,
        average_cost: Decimal,
        quantity: u64,
    ) -> Result<Self, CapitalGainsError> {
        let quantity = Decimal::from(quantity);
        let realized = |per_share: Decimal| {
            per_share
                .checked_mul(quantity)
                .ok_or(CapitalGainsError::Overflow("realized result"))
        };

        if sell_price < average_cost {
            Ok(RealizedResult::Loss(realized(average_cost - sell_price)?))
        } else {
            Ok(RealizedResult::Profit(realized(sell_price - average_cost)?))
        }
    }
}

/// Record a new loss for carryforward
pub fn record_loss(
    position: &mut PositionState,
    loss_amount: Decimal,
) -> Result<(), CapitalGainsError> {
    if loss_amount <= Decimal::ZERO {
        return Ok(());
    }
    let total = position
        .accumulated_loss()
        .checked_add(loss_amount)
        .ok_or(CapitalGainsError::Overflow("accumulated loss"))?;
    position.set_accumulated_loss(total);
    Ok(())
}

/// Consume carried losses with a realized profit.
///
/// Returns the amount of loss that was consumed. The carried loss never drops
/// below zero.
pub fn apply_profit_to_losses(position: &mut PositionState, profit: Decimal) -> Decimal {
    if profit <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let available = position.accumulated_loss();
    let applied = profit.min(available);
    position.set_accumulated_loss(available - applied);
    applied
}

/// Update the carried loss after a sale
pub fn settle_sale(
    position: &mut PositionState,
    result: RealizedResult,
) -> Result<(), CapitalGainsError> {
    match result {
        RealizedResult::Loss(loss) => record_loss(position, loss)?,
        RealizedResult::Profit(profit) => {
            apply_profit_to_losses(position, profit);
        }
    }
    Ok(())
}
