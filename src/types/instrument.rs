use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad asset class of a tradable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Forex,
    Crypto,
    Commodity,
    Index,
}

impl AssetClass {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "forex" | "fx" => Some(Self::Forex),
            "crypto" => Some(Self::Crypto),
            "commodity" => Some(Self::Commodity),
            "index" => Some(Self::Index),
            _ => None,
        }
    }

    /// Decimal places used when presenting prices of this class.
    pub fn price_decimals(&self) -> usize {
        match self {
            AssetClass::Crypto => 2,
            _ => 5,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Forex => write!(f, "forex"),
            AssetClass::Crypto => write!(f, "crypto"),
            AssetClass::Commodity => write!(f, "commodity"),
            AssetClass::Index => write!(f, "index"),
        }
    }
}

/// Static reference data for a tradable instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Base leg (e.g., "EUR", "BTC", "XAU").
    pub base: String,
    /// Quote leg (e.g., "USD").
    pub quote: String,
    /// Symbol shown to users (e.g., "EUR/USD", "GOLD/USD").
    pub display_symbol: String,
    pub asset_class: AssetClass,
    /// Free-form grouping (e.g., "Major", "Precious Metal").
    pub category: String,
}

impl Instrument {
    pub fn new(
        base: &str,
        quote: &str,
        display_symbol: &str,
        asset_class: AssetClass,
        category: &str,
    ) -> Self {
        Self {
            base: base.to_string(),
            quote: quote.to_string(),
            display_symbol: display_symbol.to_string(),
            asset_class,
            category: category.to_string(),
        }
    }

    /// Gold is the only commodity that gets its own risk discount.
    pub fn is_gold(&self) -> bool {
        self.asset_class == AssetClass::Commodity && self.base.eq_ignore_ascii_case("XAU")
    }

    /// Format a price with the precision of this instrument's asset class.
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.asset_class.price_decimals(), price)
    }

    /// Round a price to the precision of this instrument's asset class.
    pub fn round_price(&self, price: f64) -> f64 {
        let factor = 10f64.powi(self.asset_class.price_decimals() as i32);
        (price * factor).round() / factor
    }
}

/// Instruments tracked by default.
pub fn default_instruments() -> Vec<Instrument> {
    vec![
        Instrument::new("EUR", "USD", "EUR/USD", AssetClass::Forex, "Major"),
        Instrument::new("GBP", "USD", "GBP/USD", AssetClass::Forex, "Major"),
        Instrument::new("USD", "JPY", "USD/JPY", AssetClass::Forex, "Major"),
        Instrument::new("USD", "CAD", "USD/CAD", AssetClass::Forex, "Commodity"),
        Instrument::new("EUR", "GBP", "EUR/GBP", AssetClass::Forex, "Cross"),
        Instrument::new("BTC", "USD", "BTC/USD", AssetClass::Crypto, "Cryptocurrency"),
        Instrument::new("ETH", "USD", "ETH/USD", AssetClass::Crypto, "Cryptocurrency"),
        Instrument::new("XAU", "USD", "GOLD/USD", AssetClass::Commodity, "Precious Metal"),
        Instrument::new("XAG", "USD", "SILVER/USD", AssetClass::Commodity, "Precious Metal"),
        Instrument::new("NAS100", "USD", "NASDAQ 100", AssetClass::Index, "US Index"),
        Instrument::new("US30", "USD", "DOW JONES 30", AssetClass::Index, "US Index"),
        Instrument::new("SPX500", "USD", "S&P 500", AssetClass::Index, "US Index"),
    ]
}

/// Find an instrument by display symbol (case-insensitive).
pub fn find_instrument<'a>(instruments: &'a [Instrument], symbol: &str) -> Option<&'a Instrument> {
    instruments
        .iter()
        .find(|i| i.display_symbol.eq_ignore_ascii_case(symbol.trim()))
}
