//! Rates command - show the settled exchange-rate snapshot

use crate::cmd::{format_amount, read_rates, warn_fallback};
use crate::currency::Currency;
use crate::rates::RatesOutcome;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// JSON rate feed ("-" for stdin); omit to use built-in defaults
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the rate table output
#[derive(Debug, Tabled)]
struct RateRow {
    #[tabled(rename = "Currency")]
    name: String,

    #[tabled(rename = "Kind")]
    kind: String,

    #[tabled(rename = "Rate (崇高石)")]
    rate_to_base: String,

    #[tabled(rename = "Source")]
    source: String,
}

/// Snapshot data for JSON output
#[derive(Debug, Serialize)]
struct RatesData {
    outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fetched_at: Option<String>,
    rates: Vec<RateEntry>,
}

#[derive(Debug, Serialize)]
struct RateEntry {
    name: String,
    kind: String,
    rate_to_base: String,
    source: String,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let outcome = read_rates(self.rates.as_deref())?;

        if self.json {
            self.print_json(&outcome)
        } else {
            self.print_table(&outcome);
            Ok(())
        }
    }

    fn print_table(&self, outcome: &RatesOutcome) {
        let rates = outcome.rates();
        let rows: Vec<RateRow> = rates.currencies().iter().map(rate_row).collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        if let Some(at) = rates.fetched_at() {
            println!("snapshot fetched {}", at.format("%Y-%m-%d %H:%M:%S"));
        }
        warn_fallback(outcome);
    }

    fn print_json(&self, outcome: &RatesOutcome) -> anyhow::Result<()> {
        let rates = outcome.rates();
        let data = RatesData {
            outcome: match outcome.fallback_reason() {
                None => "posted".to_string(),
                Some(_) => "fallback".to_string(),
            },
            fallback_reason: outcome.fallback_reason().map(|r| r.to_string()),
            fetched_at: rates
                .fetched_at()
                .map(|at| at.format("%Y-%m-%dT%H:%M:%S").to_string()),
            rates: rates
                .currencies()
                .iter()
                .map(|c| RateEntry {
                    name: c.name.clone(),
                    kind: c.kind.display().to_string(),
                    rate_to_base: format_amount(c.rate_to_base),
                    source: c.source.display().to_string(),
                })
                .collect(),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn rate_row(currency: &Currency) -> RateRow {
    RateRow {
        name: currency.name.clone(),
        kind: currency.kind.display().to_string(),
        rate_to_base: format_amount(currency.rate_to_base),
        source: currency.source.display().to_string(),
    }
}
