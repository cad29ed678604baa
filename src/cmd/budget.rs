//! Budget command - remaining value after a wishlist of purchases

use crate::cmd::{format_amount, format_money, read_holdings, read_rates, warn_assumed, warn_fallback};
use crate::currency::{EXALTED, NTD};
use crate::valuation::{allocate_budget, Holding};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BudgetCommand {
    /// JSON rate feed ("-" for stdin); omit to use built-in defaults
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// CSV or JSON file containing wishlist entries (amount, unit)
    #[arg(short, long)]
    wishlist: PathBuf,

    /// Budget amount
    #[arg(short, long)]
    amount: Decimal,

    /// Currency the budget is held in
    #[arg(short, long, default_value = NTD)]
    unit: String,

    /// Currency to express the remainder in; defaults to the base unit
    #[arg(short = 't', long)]
    remainder: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Allocation data for JSON output
#[derive(Debug, Serialize)]
struct BudgetData {
    budget_amount: String,
    budget_unit: String,
    remainder_unit: String,
    entry_count: usize,
    budget_in_base: String,
    cost_in_base: String,
    remaining_in_base: String,
    remaining_in_target: String,
    is_deficit: bool,
    assumed_units: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl BudgetCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let outcome = read_rates(self.rates.as_deref())?;
        let wishlist = read_holdings(&self.wishlist)?;
        let remainder_unit = self.remainder.as_deref().unwrap_or(EXALTED);

        let budget = Holding::new(self.amount, &self.unit);
        let result = allocate_budget(&budget, &wishlist, outcome.rates(), remainder_unit)?;

        if self.json {
            let data = BudgetData {
                budget_amount: format_amount(self.amount),
                budget_unit: self.unit.clone(),
                remainder_unit: remainder_unit.to_string(),
                entry_count: wishlist.len(),
                budget_in_base: format_amount(result.budget_in_base),
                cost_in_base: format_amount(result.cost_in_base),
                remaining_in_base: format_amount(result.remaining_in_base),
                remaining_in_target: format_money(result.remaining_in_target),
                is_deficit: result.is_deficit,
                assumed_units: result.assumed_units.clone(),
                fallback_reason: outcome.fallback_reason().map(|r| r.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("BUDGET ALLOCATION ({} wishlist entries)", wishlist.len());
        println!();
        println!(
            "  Budget: {} {} = {} {}",
            format_amount(self.amount),
            self.unit,
            format_amount(result.budget_in_base),
            EXALTED
        );
        println!(
            "  Wishlist cost: {} {}",
            format_amount(result.cost_in_base),
            EXALTED
        );
        println!(
            "  Remaining: {} {} = {} {}",
            format_amount(result.remaining_in_base),
            EXALTED,
            format_money(result.remaining_in_target),
            remainder_unit
        );
        if result.is_deficit {
            println!();
            println!(
                "  \u{26A0} over budget by {} {}",
                format_amount(-result.remaining_in_base),
                EXALTED
            );
        }
        println!();

        warn_assumed(&result.assumed_units);
        warn_fallback(&outcome);
        Ok(())
    }
}
