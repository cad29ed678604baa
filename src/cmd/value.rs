//! Value command - basket valuation in a chosen currency

use crate::cmd::{format_amount, format_money, read_basket, read_rates, warn_assumed, warn_fallback};
use crate::currency::{CurrencyKind, EXALTED, NTD};
use crate::rates::RateTable;
use crate::valuation::{value_basket, Basket, ValuationResult};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ValueCommand {
    /// JSON rate feed ("-" for stdin); omit to use built-in defaults
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// CSV or JSON file containing basket line items
    #[arg(short, long)]
    basket: PathBuf,

    /// Currency to value the basket in
    #[arg(short, long, default_value = NTD)]
    target: String,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,

    /// Output line items as CSV
    #[arg(long)]
    csv: bool,
}

/// Row for the line-item table output
#[derive(Debug, Clone, Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "#")]
    #[serde(rename = "row_num")]
    row_num: String,

    #[tabled(rename = "Item")]
    title: String,

    #[tabled(rename = "Unit Price")]
    unit_price: String,

    #[tabled(rename = "Unit")]
    unit: String,

    #[tabled(rename = "Qty")]
    quantity: String,

    #[tabled(rename = "Subtotal")]
    subtotal: String,

    #[tabled(rename = "Base Value")]
    base_value: String,
}

/// Valuation data for JSON output
#[derive(Debug, Serialize)]
struct ValueData {
    target: String,
    item_count: usize,
    total_in_base: String,
    raw_amount: String,
    ceil_amount: String,
    assumed_units: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl ValueCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let outcome = read_rates(self.rates.as_deref())?;
        let basket = read_basket(&self.basket)?;
        let result = value_basket(&basket, outcome.rates(), &self.target)?;

        if self.json {
            let data = ValueData {
                target: self.target.clone(),
                item_count: basket.items.len(),
                total_in_base: format_amount(result.total_in_base),
                raw_amount: format_money(result.raw_amount),
                ceil_amount: format_amount(result.ceil_amount),
                assumed_units: result.assumed_units.clone(),
                fallback_reason: outcome.fallback_reason().map(|r| r.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        let rows = item_rows(&basket, outcome.rates());
        if self.csv {
            return crate::utils::write_csv(&rows, io::stdout());
        }

        self.print_table(&rows, &result, &outcome);
        Ok(())
    }

    fn print_table(
        &self,
        rows: &[ItemRow],
        result: &ValuationResult,
        outcome: &crate::rates::RatesOutcome,
    ) {
        if rows.is_empty() {
            println!("Basket is empty");
        } else {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }

        println!();
        println!("Total ({}): {}", EXALTED, format_amount(result.total_in_base));
        println!(
            "Value in {}: {}",
            self.target,
            format_in_unit(result.raw_amount, &self.target, outcome.rates())
        );
        if result.ceil_amount != result.raw_amount {
            println!(
                "Charged (rounded up): {}",
                format_in_unit(result.ceil_amount, &self.target, outcome.rates())
            );
        }

        warn_assumed(&result.assumed_units);
        warn_fallback(outcome);
    }
}

fn item_rows(basket: &Basket, rates: &RateTable) -> Vec<ItemRow> {
    basket
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let rate = rates.rate_to_base(&item.unit).unwrap_or(Decimal::ONE);
            ItemRow {
                row_num: format!("#{}", i + 1),
                title: item.title.clone().unwrap_or_default(),
                unit_price: format_amount(item.unit_price),
                unit: item.unit.clone(),
                quantity: item.quantity.to_string(),
                subtotal: format_amount(item.subtotal_in_unit()),
                base_value: format_amount(item.subtotal_in_unit() * rate),
            }
        })
        .collect()
}

/// Cash values get the NT$ prefix the storefront uses; orbs read as
/// "<amount> <unit>".
fn format_in_unit(amount: Decimal, unit: &str, rates: &RateTable) -> String {
    let is_cash = rates
        .get(unit)
        .map(|c| c.kind == CurrencyKind::Cash)
        .unwrap_or(false);
    if is_cash {
        format!("NT$ {}", format_money(amount))
    } else {
        format!("{} {}", format_money(amount), unit)
    }
}
