//! Budget allocation: what remains of a budget after a wishlist of
//! intended purchases.

use super::{ensure_non_negative, rate_or_assume, Holding};
use crate::error::EngineError;
use crate::rates::RateTable;
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of allocating a budget against a wishlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub budget_in_base: Decimal,
    pub cost_in_base: Decimal,
    /// Negative when the wishlist exceeds the budget.
    pub remaining_in_base: Decimal,
    /// Remaining value expressed in the remainder currency.
    pub remaining_in_target: Decimal,
    pub is_deficit: bool,
    pub assumed_units: Vec<String>,
}

/// Convert the budget and every wishlist entry to base units, take the
/// difference, and express it in `remainder_unit`.
///
/// The wishlist may be any length and is re-read on every call; the
/// computation has no state, so callers edit the list and simply call
/// again.
pub fn allocate_budget(
    budget: &Holding,
    wishlist: &[Holding],
    rates: &RateTable,
    remainder_unit: &str,
) -> Result<AllocationResult, EngineError> {
    ensure_non_negative(budget, "budget")?;

    let mut assumed = Vec::new();
    let budget_in_base = budget.amount * rate_or_assume(rates, &budget.unit, &mut assumed);

    let mut cost_in_base = Decimal::ZERO;
    for entry in wishlist {
        ensure_non_negative(entry, "wishlist entry")?;
        cost_in_base += entry.amount * rate_or_assume(rates, &entry.unit, &mut assumed);
    }

    let remaining_in_base = budget_in_base - cost_in_base;
    let remainder_rate = rate_or_assume(rates, remainder_unit, &mut assumed);

    Ok(AllocationResult {
        budget_in_base,
        cost_in_base,
        remaining_in_base,
        remaining_in_target: remaining_in_base / remainder_rate,
        is_deficit: remaining_in_base < Decimal::ZERO,
        assumed_units: assumed,
    })
}
