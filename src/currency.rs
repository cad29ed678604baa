//! The fixed currency universe of the marketplace.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Exalted Orb, the base unit of account.
pub const EXALTED: &str = "崇高石";
/// Divine Orb, the premium orb the cash quote hangs off.
pub const DIVINE: &str = "神聖石";
/// Chaos Orb.
pub const CHAOS: &str = "混沌石";
/// New Taiwan Dollar, quoted as cash per one Divine Orb.
pub const NTD: &str = "新台幣";

/// How a currency relates to the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyKind {
    /// The unit of account. Rate is always 1.
    Base,
    /// Game currency quoted directly in base units.
    Orb,
    /// Real-world currency quoted as cash units per one Divine Orb.
    Cash,
}

impl CurrencyKind {
    pub fn display(&self) -> &'static str {
        match self {
            CurrencyKind::Base => "base",
            CurrencyKind::Orb => "orb",
            CurrencyKind::Cash => "cash",
        }
    }
}

impl std::fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Where a settled rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    /// The base unit; its rate cannot be posted.
    Fixed,
    /// The rate source posted a valid price.
    Posted,
    /// Built-in default substituted for a missing or invalid price.
    Default,
}

impl RateSource {
    pub fn display(&self) -> &'static str {
        match self {
            RateSource::Fixed => "fixed",
            RateSource::Posted => "posted",
            RateSource::Default => "default",
        }
    }
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A currency with its settled conversion rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub name: String,
    pub kind: CurrencyKind,
    /// Base units one unit of this currency is worth. Strictly positive.
    pub rate_to_base: Decimal,
    pub source: RateSource,
}

/// Registry entry: a known currency and its default quote.
pub(crate) struct CurrencySpec {
    pub name: &'static str,
    pub kind: CurrencyKind,
    /// Used when the rate source has no valid entry: base units per unit
    /// for orbs, cash units per Divine for cash.
    pub default_quote: Decimal,
}

/// Known currencies in display order. The Divine Orb precedes the cash
/// currency so its rate is settled before the cash derivation needs it.
pub(crate) fn registry() -> [CurrencySpec; 4] {
    [
        CurrencySpec {
            name: EXALTED,
            kind: CurrencyKind::Base,
            default_quote: Decimal::ONE,
        },
        CurrencySpec {
            name: DIVINE,
            kind: CurrencyKind::Orb,
            default_quote: dec!(800),
        },
        CurrencySpec {
            name: CHAOS,
            kind: CurrencyKind::Orb,
            default_quote: dec!(5),
        },
        CurrencySpec {
            name: NTD,
            kind: CurrencyKind::Cash,
            default_quote: dec!(5),
        },
    ]
}
