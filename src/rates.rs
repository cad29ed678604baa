//! Exchange-rate snapshots built from the marketplace rate feed.
//!
//! The feed is the product list served by the backend; currencies are the
//! products whose title matches a known currency name. A snapshot is built
//! wholesale from one feed and never mutated afterwards, so concurrent
//! valuations can share it freely.

use crate::currency::{registry, Currency, CurrencyKind, CurrencySpec, RateSource, DIVINE};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One posted price from the rate feed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RateRecord {
    /// Product title; only titles matching a known currency take effect.
    pub title: String,
    /// Base units per unit for orbs; cash units per one Divine Orb for the
    /// cash currency.
    pub price: Decimal,
}

/// The marketplace rate feed, as served by the products endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RateFeed {
    /// When the feed was fetched, if the caller recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<NaiveDateTime>,
    pub products: Vec<RateRecord>,
}

/// Immutable snapshot of settled rates, one entry per known currency, in
/// registry order. Every rate is strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    currencies: Vec<Currency>,
    fetched_at: Option<NaiveDateTime>,
}

/// Why a snapshot fell back to default rates.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The feed had no products at all.
    EmptySource,
    /// Some currencies had no posted price.
    MissingCurrencies(Vec<String>),
    /// A posted price was zero or negative.
    InvalidPrice { name: String, price: Decimal },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::EmptySource => {
                write!(f, "rate source returned no products; using built-in defaults")
            }
            FallbackReason::MissingCurrencies(names) => {
                write!(f, "no posted price for {}; using defaults", names.join(", "))
            }
            FallbackReason::InvalidPrice { name, price } => {
                write!(f, "posted price {} for {} is not positive; using default", price, name)
            }
        }
    }
}

/// Result of building a snapshot: either every non-base currency carried a
/// valid posted price, or defaults filled the gaps. The table is complete
/// and usable either way; the tag lets callers surface the degradation.
#[derive(Debug, Clone, PartialEq)]
pub enum RatesOutcome {
    Posted(RateTable),
    Fallback {
        rates: RateTable,
        reason: FallbackReason,
    },
}

impl RatesOutcome {
    pub fn rates(&self) -> &RateTable {
        match self {
            RatesOutcome::Posted(rates) => rates,
            RatesOutcome::Fallback { rates, .. } => rates,
        }
    }

    pub fn into_rates(self) -> RateTable {
        match self {
            RatesOutcome::Posted(rates) => rates,
            RatesOutcome::Fallback { rates, .. } => rates,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            RatesOutcome::Posted(_) => None,
            RatesOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

impl RateTable {
    /// Build a snapshot from posted records. The first record per title
    /// wins; titles not naming a known currency are ignored; missing or
    /// non-positive prices fall back to the registry default for that
    /// currency.
    pub fn from_records(
        records: &[RateRecord],
        fetched_at: Option<NaiveDateTime>,
    ) -> RatesOutcome {
        let mut currencies = Vec::with_capacity(registry().len());
        let mut missing: Vec<String> = Vec::new();
        let mut invalid: Option<(String, Decimal)> = None;

        // Registry order settles the Divine rate before the cash
        // derivation needs it.
        let mut divine_rate = Decimal::ZERO;

        for spec in registry() {
            let posted = records.iter().find(|r| r.title == spec.name).map(|r| r.price);
            let currency = match spec.kind {
                CurrencyKind::Base => Currency {
                    name: spec.name.to_string(),
                    kind: spec.kind,
                    rate_to_base: Decimal::ONE,
                    source: RateSource::Fixed,
                },
                CurrencyKind::Orb => {
                    let (rate, source) = settle_quote(&spec, posted, &mut missing, &mut invalid);
                    if spec.name == DIVINE {
                        divine_rate = rate;
                    }
                    Currency {
                        name: spec.name.to_string(),
                        kind: spec.kind,
                        rate_to_base: rate,
                        source,
                    }
                }
                CurrencyKind::Cash => {
                    // The posted quote is cash units per one Divine Orb, so
                    // one cash unit is worth divine_rate / quote base units.
                    let (quote, source) = settle_quote(&spec, posted, &mut missing, &mut invalid);
                    Currency {
                        name: spec.name.to_string(),
                        kind: spec.kind,
                        rate_to_base: divine_rate / quote,
                        source,
                    }
                }
            };
            currencies.push(currency);
        }

        let rates = RateTable {
            currencies,
            fetched_at,
        };

        if records.is_empty() {
            RatesOutcome::Fallback {
                rates,
                reason: FallbackReason::EmptySource,
            }
        } else if let Some((name, price)) = invalid {
            RatesOutcome::Fallback {
                rates,
                reason: FallbackReason::InvalidPrice { name, price },
            }
        } else if !missing.is_empty() {
            RatesOutcome::Fallback {
                rates,
                reason: FallbackReason::MissingCurrencies(missing),
            }
        } else {
            RatesOutcome::Posted(rates)
        }
    }

    pub fn from_feed(feed: &RateFeed) -> RatesOutcome {
        Self::from_records(&feed.products, feed.fetched_at)
    }

    /// The all-defaults snapshot, for use before any feed is available.
    pub fn default_table() -> RateTable {
        Self::from_records(&[], None).into_rates()
    }

    /// Settled currencies in registry order.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn get(&self, name: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.name == name)
    }

    /// Base units one unit of `name` is worth, if the currency is known.
    pub fn rate_to_base(&self, name: &str) -> Option<Decimal> {
        self.get(name).map(|c| c.rate_to_base)
    }

    pub fn fetched_at(&self) -> Option<NaiveDateTime> {
        self.fetched_at
    }
}

fn settle_quote(
    spec: &CurrencySpec,
    posted: Option<Decimal>,
    missing: &mut Vec<String>,
    invalid: &mut Option<(String, Decimal)>,
) -> (Decimal, RateSource) {
    match posted {
        Some(price) if price > Decimal::ZERO => (price, RateSource::Posted),
        Some(price) => {
            log::debug!(
                "posted price {} for {} is not positive, using default {}",
                price,
                spec.name,
                spec.default_quote
            );
            if invalid.is_none() {
                *invalid = Some((spec.name.to_string(), price));
            }
            (spec.default_quote, RateSource::Default)
        }
        None => {
            log::debug!("no posted price for {}, using default {}", spec.name, spec.default_quote);
            missing.push(spec.name.to_string());
            (spec.default_quote, RateSource::Default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{CHAOS, EXALTED, NTD};
    use rust_decimal_macros::dec;

    fn record(title: &str, price: Decimal) -> RateRecord {
        RateRecord {
            title: title.to_string(),
            price,
        }
    }

    #[test]
    fn defaults_when_no_source() {
        let rates = RateTable::default_table();
        assert_eq!(rates.rate_to_base(EXALTED), Some(dec!(1)));
        assert_eq!(rates.rate_to_base(DIVINE), Some(dec!(800)));
        assert_eq!(rates.rate_to_base(CHAOS), Some(dec!(5)));
        // 1 Divine = 5 cash, so 1 cash = 800 / 5 base units
        assert_eq!(rates.rate_to_base(NTD), Some(dec!(160)));
    }

    #[test]
    fn empty_source_is_tagged() {
        let outcome = RateTable::from_records(&[], None);
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::EmptySource));
    }

    #[test]
    fn full_feed_is_posted() {
        let records = vec![
            record(DIVINE, dec!(800)),
            record(CHAOS, dec!(5)),
            record(NTD, dec!(5)),
        ];
        let outcome = RateTable::from_records(&records, None);
        assert!(outcome.fallback_reason().is_none());

        let rates = outcome.rates();
        assert_eq!(rates.rate_to_base(DIVINE), Some(dec!(800)));
        assert_eq!(rates.rate_to_base(NTD), Some(dec!(160)));
        assert_eq!(rates.get(DIVINE).unwrap().source, RateSource::Posted);
        assert_eq!(rates.get(EXALTED).unwrap().source, RateSource::Fixed);
    }

    #[test]
    fn cash_derivation_follows_posted_divine() {
        // 1 Divine = 900 base and 1 Divine = 30 cash, so 1 cash = 30 base.
        let records = vec![
            record(DIVINE, dec!(900)),
            record(CHAOS, dec!(6)),
            record(NTD, dec!(30)),
        ];
        let rates = RateTable::from_records(&records, None).into_rates();
        assert_eq!(rates.rate_to_base(NTD), Some(dec!(30)));
    }

    #[test]
    fn missing_currencies_are_tagged() {
        let records = vec![record(DIVINE, dec!(800))];
        let outcome = RateTable::from_records(&records, None);
        assert_eq!(
            outcome.fallback_reason(),
            Some(&FallbackReason::MissingCurrencies(vec![
                CHAOS.to_string(),
                NTD.to_string()
            ]))
        );
        // The table is still complete.
        assert_eq!(outcome.rates().rate_to_base(CHAOS), Some(dec!(5)));
    }

    #[test]
    fn invalid_price_falls_back_to_default() {
        let records = vec![
            record(DIVINE, dec!(800)),
            record(CHAOS, dec!(0)),
            record(NTD, dec!(5)),
        ];
        let outcome = RateTable::from_records(&records, None);
        assert_eq!(
            outcome.fallback_reason(),
            Some(&FallbackReason::InvalidPrice {
                name: CHAOS.to_string(),
                price: dec!(0)
            })
        );
        let rates = outcome.rates();
        assert_eq!(rates.rate_to_base(CHAOS), Some(dec!(5)));
        assert_eq!(rates.get(CHAOS).unwrap().source, RateSource::Default);
    }

    #[test]
    fn first_record_per_title_wins() {
        let records = vec![
            record(DIVINE, dec!(800)),
            record(DIVINE, dec!(900)),
            record(CHAOS, dec!(5)),
            record(NTD, dec!(5)),
        ];
        let rates = RateTable::from_records(&records, None).into_rates();
        assert_eq!(rates.rate_to_base(DIVINE), Some(dec!(800)));
    }

    #[test]
    fn unknown_titles_are_ignored() {
        let records = vec![
            record(DIVINE, dec!(800)),
            record(CHAOS, dec!(5)),
            record(NTD, dec!(5)),
            record("赤紅甲冑", dec!(120)),
        ];
        let outcome = RateTable::from_records(&records, None);
        assert!(outcome.fallback_reason().is_none());
        assert!(outcome.rates().rate_to_base("赤紅甲冑").is_none());
    }

    #[test]
    fn posted_base_price_is_ignored() {
        let records = vec![
            record(EXALTED, dec!(50)),
            record(DIVINE, dec!(800)),
            record(CHAOS, dec!(5)),
            record(NTD, dec!(5)),
        ];
        let rates = RateTable::from_records(&records, None).into_rates();
        assert_eq!(rates.rate_to_base(EXALTED), Some(dec!(1)));
    }

    #[test]
    fn all_rates_strictly_positive() {
        let records = vec![record(DIVINE, dec!(-3)), record(CHAOS, dec!(0))];
        let rates = RateTable::from_records(&records, None).into_rates();
        for currency in rates.currencies() {
            assert!(currency.rate_to_base > Decimal::ZERO, "{}", currency.name);
        }
    }

    #[test]
    fn feed_json_parses() {
        let json = r#"{
            "fetched_at": "2025-11-30T12:00:00",
            "products": [
                {"title": "神聖石", "price": 800},
                {"title": "混沌石", "price": 5},
                {"title": "新台幣", "price": 5}
            ]
        }"#;

        let feed: RateFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.products.len(), 3);

        let outcome = RateTable::from_feed(&feed);
        assert!(outcome.fallback_reason().is_none());
        assert!(outcome.rates().fetched_at().is_some());
    }

    #[test]
    fn feed_without_timestamp() {
        let json = r#"{"products": []}"#;
        let feed: RateFeed = serde_json::from_str(json).unwrap();
        let outcome = RateTable::from_feed(&feed);
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::EmptySource));
        assert!(outcome.rates().fetched_at().is_none());
    }
}
