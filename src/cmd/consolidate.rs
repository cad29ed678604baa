//! Consolidate command - mixed holdings into whole units of one currency

use crate::cmd::{format_amount, read_holdings, read_rates, warn_assumed, warn_fallback};
use crate::currency::{DIVINE, EXALTED};
use crate::rates::RateTable;
use crate::valuation::{consolidate_assets, Holding};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ConsolidateCommand {
    /// JSON rate feed ("-" for stdin); omit to use built-in defaults
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// CSV or JSON file containing held amounts (amount, unit)
    #[arg(short = 'H', long)]
    holdings: PathBuf,

    /// Currency to consolidate into
    #[arg(short, long, default_value = DIVINE)]
    target: String,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the holdings table output
#[derive(Debug, Tabled)]
struct HoldingRow {
    #[tabled(rename = "#")]
    row_num: String,

    #[tabled(rename = "Holding")]
    title: String,

    #[tabled(rename = "Amount")]
    amount: String,

    #[tabled(rename = "Unit")]
    unit: String,

    #[tabled(rename = "Base Value")]
    base_value: String,
}

/// Consolidation data for JSON output
#[derive(Debug, Serialize)]
struct ConsolidateData {
    target: String,
    holding_count: usize,
    total_in_base: String,
    final_amount: String,
    floor_amount: String,
    fractional_remainder: String,
    assumed_units: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl ConsolidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let outcome = read_rates(self.rates.as_deref())?;
        let holdings = read_holdings(&self.holdings)?;
        let result = consolidate_assets(&holdings, outcome.rates(), &self.target)?;

        if self.json {
            let data = ConsolidateData {
                target: self.target.clone(),
                holding_count: holdings.len(),
                total_in_base: format_amount(result.total_in_base),
                final_amount: format_amount(result.final_amount),
                floor_amount: format_amount(result.floor_amount),
                fractional_remainder: format_amount(result.fractional_remainder),
                assumed_units: result.assumed_units.clone(),
                fallback_reason: outcome.fallback_reason().map(|r| r.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        if holdings.is_empty() {
            println!("No holdings");
        } else {
            let rows = holding_rows(&holdings, outcome.rates());
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }

        println!();
        println!("  Total: {} {}", format_amount(result.total_in_base), EXALTED);
        println!(
            "  In {}: {}",
            self.target,
            format_amount(result.final_amount)
        );
        println!(
            "  Whole units: {} ({} left over)",
            format_amount(result.floor_amount),
            format_amount(result.fractional_remainder)
        );
        println!();

        warn_assumed(&result.assumed_units);
        warn_fallback(&outcome);
        Ok(())
    }
}

fn holding_rows(holdings: &[Holding], rates: &RateTable) -> Vec<HoldingRow> {
    holdings
        .iter()
        .enumerate()
        .map(|(i, holding)| {
            let rate = rates.rate_to_base(&holding.unit).unwrap_or(Decimal::ONE);
            HoldingRow {
                row_num: format!("#{}", i + 1),
                title: holding.title.clone().unwrap_or_default(),
                amount: format_amount(holding.amount),
                unit: holding.unit.clone(),
                base_value: format_amount(holding.amount * rate),
            }
        })
        .collect()
}
