//! Basket valuation: total a set of line items in a chosen currency.

use super::rate_or_assume;
use crate::error::EngineError;
use crate::rates::RateTable;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A priced quantity of one product.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub unit_price: Decimal,
    /// Currency the price is quoted in.
    pub unit: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(unit_price: Decimal, unit: &str, quantity: u32) -> Self {
        LineItem {
            title: None,
            unit_price,
            unit: unit.to_string(),
            quantity,
        }
    }

    /// Price times quantity, still in the item's own currency.
    pub fn subtotal_in_unit(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.unit)
    }
}

/// Ordered collection of line items. Order matters for display only; the
/// valuation is a sum and does not depend on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Basket {
    pub items: Vec<LineItem>,
}

impl Basket {
    pub fn new(items: Vec<LineItem>) -> Self {
        Basket { items }
    }
}

/// Outcome of valuing a basket in a target currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    /// Total across all items, in base units.
    pub total_in_base: Decimal,
    /// Target-currency value, rounded to 2 decimal places for display.
    pub raw_amount: Decimal,
    /// Target-currency value rounded up to the next whole unit, which is
    /// what a cash payment actually collects.
    pub ceil_amount: Decimal,
    /// Units valued at an assumed rate of 1 because the snapshot had no
    /// entry for them. Non-empty means the figures are approximate.
    pub assumed_units: Vec<String>,
}

/// Value a basket in the target currency against one rate snapshot.
///
/// Rejects zero quantities and negative prices; unknown units degrade to
/// an assumed rate of 1 and are flagged on the result.
pub fn value_basket(
    basket: &Basket,
    rates: &RateTable,
    target: &str,
) -> Result<ValuationResult, EngineError> {
    let mut assumed = Vec::new();
    let mut total_in_base = Decimal::ZERO;

    for item in &basket.items {
        if item.quantity == 0 {
            return Err(EngineError::InvalidQuantity(item.display_name().to_string()));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(EngineError::NegativeAmount {
                context: item.display_name().to_string(),
                amount: item.unit_price,
            });
        }
        let rate = rate_or_assume(rates, &item.unit, &mut assumed);
        total_in_base += item.subtotal_in_unit() * rate;
    }

    let target_rate = rate_or_assume(rates, target, &mut assumed);
    let raw = total_in_base / target_rate;

    Ok(ValuationResult {
        total_in_base,
        raw_amount: raw.round_dp(2),
        ceil_amount: raw.ceil(),
        assumed_units: assumed,
    })
}
