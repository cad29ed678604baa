//! Pure valuation operations over a rate snapshot.
//!
//! Every operation is a function of its explicit inputs: a collection of
//! priced entries, one `RateTable` snapshot, and a target currency name.
//! Results own their data, so rebuilding the snapshot later never changes
//! a result already returned.

pub mod basket;
pub mod budget;
pub mod consolidate;

pub use basket::{value_basket, Basket, LineItem, ValuationResult};
pub use budget::{allocate_budget, AllocationResult};
pub use consolidate::{consolidate_assets, ConsolidationResult};

use crate::error::EngineError;
use crate::rates::RateTable;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An amount held (or wanted) in some currency.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Holding {
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub amount: Decimal,
    /// Currency the amount is held in.
    pub unit: String,
}

impl Holding {
    pub fn new(amount: Decimal, unit: &str) -> Self {
        Holding {
            title: None,
            amount,
            unit: unit.to_string(),
        }
    }

    fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.unit)
    }
}

/// JSON input wrapper for a list of holdings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HoldingList {
    pub holdings: Vec<Holding>,
}

/// Rate for `unit`, substituting 1 when the snapshot has no entry. The
/// substitution is recorded in `assumed` so callers can flag the result
/// as approximate instead of trusting it silently.
pub(crate) fn rate_or_assume(rates: &RateTable, unit: &str, assumed: &mut Vec<String>) -> Decimal {
    match rates.rate_to_base(unit) {
        Some(rate) => rate,
        None => {
            log::debug!("no rate for {}, assuming 1 base unit", unit);
            if !assumed.iter().any(|u| u == unit) {
                assumed.push(unit.to_string());
            }
            Decimal::ONE
        }
    }
}

pub(crate) fn ensure_non_negative(holding: &Holding, what: &str) -> Result<(), EngineError> {
    if holding.amount < Decimal::ZERO {
        return Err(EngineError::NegativeAmount {
            context: format!("{} {}", what, holding.display_name()),
            amount: holding.amount,
        });
    }
    Ok(())
}
