//! Price API Adapter
//!
//! Implements the outbound HTTP side of the price feed: a thin
//! `reqwest`-based client for a CoinGecko-compatible simple-price
//! endpoint, mapped onto the `QuoteSource` port.
//!
//! Sub-modules:
//! - `client`: HTTP client, status/body validation, quote parsing

pub mod client;

pub use client::SimplePriceClient;
