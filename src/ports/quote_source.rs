//! Quote Source Port - Spot Price Data Interface
//!
//! Defines the trait for fetching the current spot quotes rendered in
//! the ticker, plus the failure taxonomy a fetch can produce. The
//! hexagonal architecture ensures the poller never depends on transport
//! details; tests mock this trait directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::quote::PriceQuote;

/// Failure modes of a single quote fetch.
///
/// Every variant collapses to the same fallback behavior in the poller.
/// The distinction exists for logging and metrics only — visitors never
/// see an error state.
#[derive(Debug, Error)]
pub enum FeedError {
  /// Deadline elapsed before a response arrived; the in-flight request
  /// was cancelled, not retried.
  #[error("quote request timed out")]
  Timeout,
  /// Connection-level failure (DNS, TLS, reset, refused).
  #[error("network error: {0}")]
  Network(String),
  /// HTTP 429 from the price API.
  #[error("price API rate limit exceeded")]
  RateLimited,
  /// Any other non-success HTTP status.
  #[error("unexpected HTTP status {0}")]
  Status(u16),
  /// Empty or malformed response body.
  #[error("invalid response body: {0}")]
  Data(String),
}

impl FeedError {
  /// Stable label used for metrics and structured log fields.
  pub fn reason(&self) -> &'static str {
    match self {
      Self::Timeout => "timeout",
      Self::Network(_) => "network",
      Self::RateLimited => "rate_limited",
      Self::Status(_) => "status",
      Self::Data(_) => "data",
    }
  }
}

/// Trait for spot-price providers.
///
/// Implementors perform exactly one outbound request per call and return
/// either the full quote list, in provider order, or a single
/// [`FeedError`] — never a partial list.
#[async_trait]
pub trait QuoteSource: Send + Sync + 'static {
  /// Fetch the current quote list for the configured assets.
  async fn fetch_quotes(&self) -> Result<Vec<PriceQuote>, FeedError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reason_labels_are_stable() {
    assert_eq!(FeedError::Timeout.reason(), "timeout");
    assert_eq!(FeedError::Network("reset".into()).reason(), "network");
    assert_eq!(FeedError::RateLimited.reason(), "rate_limited");
    assert_eq!(FeedError::Status(500).reason(), "status");
    assert_eq!(FeedError::Data("empty".into()).reason(), "data");
  }
}
