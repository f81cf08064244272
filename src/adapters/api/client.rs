//! Simple-price HTTP Client - Price API REST Adapter
//!
//! Implements the `QuoteSource` port against the CoinGecko
//! `simple/price` endpoint. One GET per poll cycle, JSON only,
//! intermediary caching disabled. Response ordering is preserved so the
//! ticker renders assets in the order the API returned them.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::FeedConfig;
use crate::domain::quote::PriceQuote;
use crate::ports::quote_source::{FeedError, QuoteSource};

/// HTTP client for a simple-price quote endpoint.
pub struct SimplePriceClient {
  /// Underlying HTTP client.
  http: Client,
  /// Fully assembled query URL (endpoint + ids + currency).
  url: String,
}

impl SimplePriceClient {
  /// Create a new client from the feed configuration.
  ///
  /// The asset list is comma-joined into the query string once, at
  /// construction - the request is identical on every cycle.
  pub fn new(config: &FeedConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .build()
      .context("Failed to build price API HTTP client")?;

    let url = format!(
      "{}?ids={}&vs_currencies={}",
      config.endpoint,
      config.assets.join(","),
      config.vs_currency
    );

    Ok(Self { http, url })
  }

  /// The exact URL queried on every cycle.
  pub fn url(&self) -> &str {
    &self.url
  }

  /// Parse a simple-price response body into ordered quotes.
  ///
  /// The body is a JSON object mapping asset id to `{"usd": <number>}`.
  /// Entry order follows the document (serde_json `preserve_order`).
  /// An empty body, an empty object, or any entry without a usable
  /// non-negative `usd` field fails the whole cycle - no partial lists.
  fn parse_body(body: &str) -> Result<Vec<PriceQuote>, FeedError> {
    if body.trim().is_empty() {
      return Err(FeedError::Data("empty response body".to_string()));
    }

    let map: serde_json::Map<String, Value> = serde_json::from_str(body)
      .map_err(|e| FeedError::Data(e.to_string()))?;

    if map.is_empty() {
      return Err(FeedError::Data("no assets in response".to_string()));
    }

    let mut quotes = Vec::with_capacity(map.len());
    for (id, entry) in &map {
      let usd = entry
        .get("usd")
        .and_then(Value::as_f64)
        .ok_or_else(|| FeedError::Data(format!("missing usd price for {id}")))?;

      if !usd.is_finite() || usd < 0.0 {
        return Err(FeedError::Data(format!("invalid usd price for {id}")));
      }

      quotes.push(PriceQuote::from_asset_id(id, usd));
    }

    Ok(quotes)
  }
}

#[async_trait]
impl QuoteSource for SimplePriceClient {
  async fn fetch_quotes(&self) -> Result<Vec<PriceQuote>, FeedError> {
    let response = self
      .http
      .get(&self.url)
      .header(header::ACCEPT, "application/json")
      .header(header::CACHE_CONTROL, "no-cache")
      .send()
      .await
      .map_err(|e| {
        if e.is_timeout() {
          FeedError::Timeout
        } else {
          FeedError::Network(e.to_string())
        }
      })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
      return Err(FeedError::RateLimited);
    }
    if !status.is_success() {
      return Err(FeedError::Status(status.as_u16()));
    }

    let body = response
      .text()
      .await
      .map_err(|e| FeedError::Network(e.to_string()))?;

    let quotes = Self::parse_body(&body)?;
    debug!(assets = quotes.len(), "Fetched live quotes");
    Ok(quotes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_url_assembly() {
    let config = FeedConfig::default();
    let client = SimplePriceClient::new(&config).unwrap();
    assert!(client.url().starts_with(
      "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,"
    ));
    assert!(client.url().ends_with("&vs_currencies=usd"));
    assert_eq!(client.url().matches(',').count(), 9);
  }

  #[test]
  fn test_parse_single_asset() {
    let quotes =
      SimplePriceClient::parse_body(r#"{"bitcoin":{"usd":65432.1}}"#).unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].id, "bitcoin");
    assert_eq!(quotes[0].name, "Bitcoin");
    assert_eq!(quotes[0].symbol, "BITCOIN");
    assert_eq!(quotes[0].price, 65432.1);
  }

  #[test]
  fn test_parse_preserves_response_order() {
    let body = r#"{"solana":{"usd":150.0},"bitcoin":{"usd":65000.0},"cardano":{"usd":2.5}}"#;
    let quotes = SimplePriceClient::parse_body(body).unwrap();
    let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["solana", "bitcoin", "cardano"]);
  }

  #[test]
  fn test_parse_empty_body_is_failure() {
    let err = SimplePriceClient::parse_body("").unwrap_err();
    assert_eq!(err.reason(), "data");
  }

  #[test]
  fn test_parse_empty_object_is_failure() {
    let err = SimplePriceClient::parse_body("{}").unwrap_err();
    assert_eq!(err.reason(), "data");
  }

  #[test]
  fn test_parse_missing_usd_field_is_failure() {
    let err =
      SimplePriceClient::parse_body(r#"{"bitcoin":{"eur":60000.0}}"#).unwrap_err();
    assert!(matches!(err, FeedError::Data(_)));
  }

  #[test]
  fn test_parse_negative_price_is_failure() {
    let err =
      SimplePriceClient::parse_body(r#"{"bitcoin":{"usd":-1.0}}"#).unwrap_err();
    assert!(matches!(err, FeedError::Data(_)));
  }

  #[test]
  fn test_parse_non_object_body_is_failure() {
    let err = SimplePriceClient::parse_body("[1,2,3]").unwrap_err();
    assert!(matches!(err, FeedError::Data(_)));
  }
}
