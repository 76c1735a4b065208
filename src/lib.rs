//! Capital gains - per-operation capital gains tax for stock trading histories
//!
//! This library computes the tax owed on each buy/sell operation of a trading
//! history using weighted average cost, a minimum taxable operation value and
//! loss carryforward.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod tax;
pub mod wire;

pub use error::CapitalGainsError;
pub use models::{Operation, OperationKind, TaxResult};
pub use tax::{BatchProcessor, TaxPolicy};
