use rust_decimal::Decimal;

use crate::error::CapitalGainsError;

/// Weighted average cost after buying `bought_quantity` shares at `buy_price`.
///
/// `(current_average * current_quantity + buy_price * bought_quantity) / (current_quantity + bought_quantity)`
///
/// When the combined quantity is zero (buying nothing while holding nothing) the
/// current average is returned unchanged. Fails with `Overflow` when the
/// position value no longer fits in a `Decimal`.
pub fn weighted_average(
    buy_price: Decimal,
    current_average: Decimal,
    current_quantity: u64,
    bought_quantity: u64,
) -> Result<Decimal, CapitalGainsError> {
    let total_quantity = Decimal::from(current_quantity) + Decimal::from(bought_quantity);
    if total_quantity.is_zero() {
        return Ok(current_average);
    }

    let held_value = current_average
        .checked_mul(Decimal::from(current_quantity))
        .ok_or(CapitalGainsError::Overflow("held position value"))?;
    let bought_value = buy_price
        .checked_mul(Decimal::from(bought_quantity))
        .ok_or(CapitalGainsError::Overflow("purchase value"))?;

    held_value
        .checked_add(bought_value)
        .and_then(|total| total.checked_div(total_quantity))
        .ok_or(CapitalGainsError::Overflow("weighted average cost"))
}

/// Running position of a single security within one batch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionState {
    quantity_held: u64,
    average_cost: Decimal,
    accumulated_loss: Decimal,
}

impl PositionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity_held(&self) -> u64 {
        self.quantity_held
    }

    /// Average cost of the held shares. Kept after the position is emptied;
    /// the next purchase weighs it by zero.
    pub fn average_cost(&self) -> Decimal {
        self.average_cost
    }

    pub fn accumulated_loss(&self) -> Decimal {
        self.accumulated_loss
    }

    /// Add a purchase: recompute the average and increase the held quantity.
    /// On overflow the position is left as it was.
    pub fn add_purchase(
        &mut self,
        unit_cost: Decimal,
        quantity: u64,
    ) -> Result<(), CapitalGainsError> {
        let average_cost =
            weighted_average(unit_cost, self.average_cost, self.quantity_held, quantity)?;
        let quantity_held = self
            .quantity_held
            .checked_add(quantity)
            .ok_or(CapitalGainsError::Overflow("quantity held"))?;

        self.average_cost = average_cost;
        self.quantity_held = quantity_held;
        Ok(())
    }

    /// Remove sold shares. Callers check `quantity <= quantity_held` first.
    pub(crate) fn remove_quantity(&mut self, quantity: u64) {
        self.quantity_held = self.quantity_held.saturating_sub(quantity);
    }

    pub(crate) fn set_accumulated_loss(&mut self, loss: Decimal) {
        self.accumulated_loss = loss.max(Decimal::ZERO);
    }
}
