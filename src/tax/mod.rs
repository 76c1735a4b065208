// Tax module - weighted average cost, loss carryforward and per-operation tax

pub mod batch;
pub mod cost_basis;
pub mod handlers;
pub mod loss_carryforward;
pub mod swing_trade;

pub use batch::{BatchProcessor, ProcessedOperation};
pub use cost_basis::{weighted_average, PositionState};
pub use handlers::{handle_buy, handle_sell};
pub use loss_carryforward::RealizedResult;
pub use swing_trade::{TaxCalculator, TaxPolicy};
