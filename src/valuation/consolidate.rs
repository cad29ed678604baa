//! Asset consolidation: convert mixed holdings into whole units of one
//! target currency plus the fractional value left unconverted.

use super::{ensure_non_negative, rate_or_assume, Holding};
use crate::error::EngineError;
use crate::rates::RateTable;
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of consolidating holdings into a target currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidationResult {
    pub total_in_base: Decimal,
    /// Exact value in the target currency.
    pub final_amount: Decimal,
    /// Whole target units obtainable. Game currencies do not split below
    /// one unit, so this is what a trade actually yields.
    pub floor_amount: Decimal,
    /// Value left unconverted, as a fraction of one target unit.
    pub fractional_remainder: Decimal,
    pub assumed_units: Vec<String>,
}

/// Sum the holdings in base units and decompose the target-currency value
/// into whole units plus a fractional remainder.
pub fn consolidate_assets(
    holdings: &[Holding],
    rates: &RateTable,
    target: &str,
) -> Result<ConsolidationResult, EngineError> {
    let mut assumed = Vec::new();
    let mut total_in_base = Decimal::ZERO;

    for holding in holdings {
        ensure_non_negative(holding, "holding")?;
        total_in_base += holding.amount * rate_or_assume(rates, &holding.unit, &mut assumed);
    }

    let target_rate = rate_or_assume(rates, target, &mut assumed);
    let final_amount = total_in_base / target_rate;
    let floor_amount = final_amount.floor();

    Ok(ConsolidationResult {
        total_in_base,
        final_amount,
        floor_amount,
        fractional_remainder: final_amount - floor_amount,
        assumed_units: assumed,
    })
}
