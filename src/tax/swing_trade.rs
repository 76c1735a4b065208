use rust_decimal::Decimal;

use super::loss_carryforward::RealizedResult;
use crate::error::CapitalGainsError;

/// Rate and exemption threshold applied to sales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    rate: Decimal,
    minimum_taxable_operation_value: Decimal,
}

impl TaxPolicy {
    /// 20% over profit
    pub const DEFAULT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
    /// Sales totalling less than 20000 are exempt
    pub const DEFAULT_MINIMUM_TAXABLE_OPERATION_VALUE: Decimal =
        Decimal::from_parts(20000, 0, 0, false, 0);

    /// Build a policy, rejecting a rate outside `[0, 1]` or a negative threshold
    pub fn new(
        rate: Decimal,
        minimum_taxable_operation_value: Decimal,
    ) -> Result<Self, CapitalGainsError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(CapitalGainsError::ValidationError(format!(
                "tax rate must be between 0 and 1, got {}",
                rate
            )));
        }
        if minimum_taxable_operation_value < Decimal::ZERO {
            return Err(CapitalGainsError::ValidationError(format!(
                "minimum taxable operation value must not be negative, got {}",
                minimum_taxable_operation_value
            )));
        }

        Ok(Self {
            rate,
            minimum_taxable_operation_value,
        })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn minimum_taxable_operation_value(&self) -> Decimal {
        self.minimum_taxable_operation_value
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            rate: Self::DEFAULT_RATE,
            minimum_taxable_operation_value: Self::DEFAULT_MINIMUM_TAXABLE_OPERATION_VALUE,
        }
    }
}

/// Computes the tax owed on a single sale
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    policy: TaxPolicy,
}

impl TaxCalculator {
    pub fn new(policy: TaxPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TaxPolicy {
        &self.policy
    }

    /// Tax due on selling `quantity` shares at `sell_price`.
    ///
    /// Sales below the minimum operation value are exempt even with profit,
    /// and sales below average cost owe nothing. Otherwise the profit is offset
    /// by `accumulated_loss` and the positive remainder is taxed at the policy
    /// rate. The carried loss itself is not modified here.
    pub fn compute(
        &self,
        sell_price: Decimal,
        average_cost: Decimal,
        accumulated_loss: Decimal,
        quantity: u64,
    ) -> Result<Decimal, CapitalGainsError> {
        let total_value = sell_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(CapitalGainsError::Overflow("sale total value"))?;
        if total_value < self.policy.minimum_taxable_operation_value {
            return Ok(Decimal::ZERO);
        }

        let profit = match RealizedResult::of_sale(sell_price, average_cost, quantity)? {
            RealizedResult::Loss(_) => return Ok(Decimal::ZERO),
            RealizedResult::Profit(profit) => profit,
        };

        // Both sides are non-negative and the rate is at most 1
        let taxable_basis = profit - accumulated_loss;
        if taxable_basis > Decimal::ZERO {
            Ok(taxable_basis * self.policy.rate)
        } else {
            Ok(Decimal::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn custom_calculator() -> TaxCalculator {
        TaxCalculator::new(TaxPolicy::new(dec!(0.15), dec!(10000)).unwrap())
    }

    #[test]
    fn test_default_policy() {
        let policy = TaxPolicy::default();
        assert_eq!(policy.rate(), dec!(0.20));
        assert_eq!(policy.minimum_taxable_operation_value(), dec!(20000));
    }

    #[test]
    fn test_policy_validation() {
        assert!(TaxPolicy::new(dec!(1.01), dec!(0)).is_err());
        assert!(TaxPolicy::new(dec!(-0.1), dec!(0)).is_err());
        assert!(TaxPolicy::new(dec!(0.2), dec!(-1)).is_err());
        assert!(TaxPolicy::new(dec!(0), dec!(0)).is_ok());
        assert!(TaxPolicy::new(dec!(1), dec!(0)).is_ok());
    }

    #[test]
    fn test_below_minimum_is_exempt() {
        // 15 * 1000 = 15000 < 20000, despite 5000 profit
        let tax = TaxCalculator::default().compute(dec!(15), dec!(10), dec!(0), 1000).unwrap();
        assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_at_minimum_is_taxable() {
        // 20 * 1000 = 20000, profit 10000
        let tax = TaxCalculator::default().compute(dec!(20), dec!(10), dec!(0), 1000).unwrap();
        assert_eq!(tax, dec!(2000));
    }

    #[test]
    fn test_loss_owes_nothing() {
        let tax = TaxCalculator::default().compute(dec!(10), dec!(15), dec!(0), 3000).unwrap();
        assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn test_profit_taxed_at_rate() {
        // (25 - 20) * 1000 * 0.2
        let tax = TaxCalculator::default().compute(dec!(25), dec!(20), dec!(0), 1000).unwrap();
        assert_eq!(tax, dec!(1000));
    }

    #[test]
    fn test_loss_offsets_profit() {
        // (30 - 20) * 1000 - 2000 = 8000 taxable
        let tax = TaxCalculator::default()
            .compute(dec!(30), dec!(20), dec!(2000), 1000)
            .unwrap();
        assert_eq!(tax, dec!(1600));
    }

    #[test]
    fn test_loss_exceeding_profit() {
        let tax = TaxCalculator::default()
            .compute(dec!(25), dec!(20), dec!(6000), 1000)
            .unwrap();
        assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn test_custom_rate_and_minimum() {
        let calculator = custom_calculator();
        assert_eq!(calculator.compute(dec!(30), dec!(20), dec!(0), 1000).unwrap(), dec!(1500));
        // 15000 is above the custom 10000 threshold
        assert_eq!(calculator.compute(dec!(15), dec!(10), dec!(0), 1000).unwrap(), dec!(750));
    }

    #[test]
    fn test_zero_quantity() {
        let tax = TaxCalculator::default().compute(dec!(25), dec!(20), dec!(0), 0).unwrap();
        assert_eq!(tax, Decimal::ZERO);
    }

    #[test]
    fn test_sale_value_overflow_is_an_error() {
        // 1e12 * 1e17 does not fit in a Decimal
        let err = TaxCalculator::default()
            .compute(dec!(1000000000000), dec!(1), dec!(0), 100_000_000_000_000_000)
            .unwrap_err();
        assert!(matches!(err, CapitalGainsError::Overflow("sale total value")));
    }

    #[test]
    fn test_fractional_prices() {
        // (25.75 - 20.25) * 1000 * 0.2
        let tax = TaxCalculator::default()
            .compute(dec!(25.75), dec!(20.25), dec!(0), 1000)
            .unwrap();
        assert_eq!(tax, dec!(1100));
    }
}
