//! Valuation engine for a marketplace trading in orb currencies.
//!
//! Goods are priced in several game currencies plus one real-world cash
//! currency. Rates are posted by the marketplace backend as products in an
//! exchange category; this crate turns one fetched feed into an immutable
//! [`RateTable`] snapshot and offers three pure operations over it:
//! [`value_basket`], [`allocate_budget`] and [`consolidate_assets`].
//!
//! The engine performs no I/O. Fetching the feed is the caller's concern;
//! the [`cmd`] module wires the engine to files and stdout for the CLI.

pub mod cmd;
pub mod currency;
pub mod error;
pub mod rates;
pub mod utils;
pub mod valuation;

pub use currency::{Currency, CurrencyKind, RateSource};
pub use error::EngineError;
pub use rates::{FallbackReason, RateFeed, RateRecord, RateTable, RatesOutcome};
pub use valuation::{
    allocate_budget, consolidate_assets, value_basket, AllocationResult, Basket,
    ConsolidationResult, Holding, HoldingList, LineItem, ValuationResult,
};
