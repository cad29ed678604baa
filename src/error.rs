use rust_decimal::Decimal;
use thiserror::Error;

/// Input errors the valuation engine rejects outright.
///
/// A missing exchange rate is deliberately not an error: the engine
/// substitutes a rate of 1 and flags the unit on the result via
/// `assumed_units`, so degraded figures are visible but never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Quantities must be at least 1.
    #[error("invalid quantity 0 for {0}")]
    InvalidQuantity(String),

    /// Negative money amounts cannot flow through a valuation.
    #[error("negative amount {amount} for {context}")]
    NegativeAmount { context: String, amount: Decimal },
}
