pub mod budget;
pub mod consolidate;
pub mod rates;
pub mod schema;
pub mod value;

use crate::rates::{RateFeed, RateTable, RatesOutcome};
use crate::valuation::{Basket, Holding, HoldingList};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read the rate feed (JSON, or stdin with "-") and build a snapshot.
/// No path means the built-in default rates.
pub fn read_rates(path: Option<&Path>) -> anyhow::Result<RatesOutcome> {
    let Some(path) = path else {
        return Ok(RateTable::from_records(&[], None));
    };
    let feed: RateFeed = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        if buffer.trim().is_empty() {
            anyhow::bail!("no rate feed received on stdin");
        }
        serde_json::from_str(&buffer)?
    } else {
        serde_json::from_reader(BufReader::new(File::open(path)?))?
    };
    Ok(RateTable::from_feed(&feed))
}

/// Read a basket from CSV or JSON based on the file extension.
pub fn read_basket(path: &Path) -> anyhow::Result<Basket> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let basket = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            Ok(basket)
        }
        _ => {
            let mut rdr = csv::Reader::from_reader(File::open(path)?);
            let items = rdr.deserialize().collect::<Result<Vec<_>, _>>()?;
            Ok(Basket { items })
        }
    }
}

/// Read holdings (or wishlist entries) from CSV or JSON.
pub fn read_holdings(path: &Path) -> anyhow::Result<Vec<Holding>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let list: HoldingList = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            Ok(list.holdings)
        }
        _ => {
            let mut rdr = csv::Reader::from_reader(File::open(path)?);
            Ok(rdr.deserialize().collect::<Result<Vec<_>, _>>()?)
        }
    }
}

/// Footer warning when the snapshot was not fully posted.
pub(crate) fn warn_fallback(outcome: &RatesOutcome) {
    if let Some(reason) = outcome.fallback_reason() {
        println!("\u{26A0} {}", reason);
    }
}

/// Footer warnings for units valued at an assumed rate of 1.
pub(crate) fn warn_assumed(assumed_units: &[String]) {
    for unit in assumed_units {
        println!("\u{26A0} no rate for {}; valued at 1 base unit", unit);
    }
}

/// Format a money-like value with exactly two decimal places.
pub(crate) fn format_money(amount: rust_decimal::Decimal) -> String {
    format!("{:.2}", amount)
}

/// Format an amount trimming trailing zeros.
pub(crate) fn format_amount(amount: rust_decimal::Decimal) -> String {
    let s = format!("{:.4}", amount);
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
