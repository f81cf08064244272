//! Price quote domain model.
//!
//! Display-ready quote types for the landing ticker plus the fixed
//! fallback list served whenever live data cannot be obtained.
//! No external I/O here (hexagonal architecture inner ring).

use serde::{Deserialize, Serialize};

/// A single display-ready price quote for the ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price API asset identifier (e.g. "bitcoin").
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Spot price in USD (non-negative).
    pub price: f64,
}

impl PriceQuote {
    /// Build a quote from an API asset identifier and its USD price.
    ///
    /// Live quotes derive their display fields mechanically: the name
    /// uppercases the first character of the id, the symbol is the id
    /// uppercased in full. Fallback quotes carry curated fields instead
    /// (see [`fallback_quotes`]).
    pub fn from_asset_id(id: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: capitalize(id),
            symbol: id.to_uppercase(),
            price,
        }
    }
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fixed fallback quotes shown whenever a poll cycle fails.
///
/// Replaces the published list wholesale on any fetch failure, so the
/// ticker always has a complete list to show.
pub fn fallback_quotes() -> Vec<PriceQuote> {
    vec![
        PriceQuote {
            id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price: 65_000.0,
        },
        PriceQuote {
            id: "ethereum".to_string(),
            name: "Ethereum".to_string(),
            symbol: "ETH".to_string(),
            price: 3_500.0,
        },
        PriceQuote {
            id: "tether".to_string(),
            name: "Tether".to_string(),
            symbol: "USDT".to_string(),
            price: 1.0,
        },
        PriceQuote {
            id: "binancecoin".to_string(),
            name: "BNB".to_string(),
            symbol: "BNB".to_string(),
            price: 450.0,
        },
        PriceQuote {
            id: "cardano".to_string(),
            name: "Cardano".to_string(),
            symbol: "ADA".to_string(),
            price: 2.5,
        },
    ]
}
