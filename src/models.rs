//! Operation and result types exchanged with the tax engine

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CapitalGainsError;

/// Kind of a stock operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Buy,
    Sell,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "buy",
            OperationKind::Sell => "sell",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = CapitalGainsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OperationKind::Buy),
            "SELL" => Ok(OperationKind::Sell),
            other => Err(CapitalGainsError::ParseError(format!(
                "unknown operation `{}`",
                other.to_ascii_lowercase()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for OperationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl Serialize for OperationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single buy or sell of `quantity` shares at `unit_cost` each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operation")]
    pub kind: OperationKind,
    #[serde(rename = "unit-cost", with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,
    pub quantity: u64,
}

impl Operation {
    pub fn new(kind: OperationKind, unit_cost: Decimal, quantity: u64) -> Self {
        Self {
            kind,
            unit_cost,
            quantity,
        }
    }

    pub fn buy(unit_cost: Decimal, quantity: u64) -> Self {
        Self::new(OperationKind::Buy, unit_cost, quantity)
    }

    pub fn sell(unit_cost: Decimal, quantity: u64) -> Self {
        Self::new(OperationKind::Sell, unit_cost, quantity)
    }

    /// Total value of the operation (`unit_cost * quantity`), `None` on overflow
    pub fn total_value(&self) -> Option<Decimal> {
        self.unit_cost.checked_mul(Decimal::from(self.quantity))
    }
}

/// Tax owed for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl TaxResult {
    pub fn new(tax: Decimal) -> Self {
        Self { tax }
    }

    pub fn zero() -> Self {
        Self { tax: Decimal::ZERO }
    }
}
