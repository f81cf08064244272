//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. The visitor
//! identity, the polled asset list, and the polling cadence are all
//! externalized here - nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the service begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  #[serde(default)]
  pub service: ServiceConfig,
  /// Visitor identity and classifier extras.
  #[serde(default)]
  pub visitor: VisitorConfig,
  /// Price feed polling parameters.
  #[serde(default)]
  pub feed: FeedConfig,
  /// Metrics and health endpoints.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  #[serde(default = "default_service_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Visitor identity configuration.
///
/// The identity string is the ambient input consumed exactly once at
/// startup by the classifier; it never changes for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct VisitorConfig {
  /// Self-reported identity of the visitor being served
  /// (e.g. a User-Agent value).
  #[serde(default)]
  pub identity: String,
  /// Additional crawler signatures appended to the built-in set.
  #[serde(default)]
  pub extra_signatures: Vec<String>,
}

/// Price feed polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
  /// Price API endpoint (CoinGecko simple-price compatible).
  #[serde(default = "default_endpoint")]
  pub endpoint: String,
  /// Asset identifiers requested on every cycle, comma-joined into the
  /// query string in this order.
  #[serde(default = "default_assets")]
  pub assets: Vec<String>,
  /// Quote currency code.
  #[serde(default = "default_vs_currency")]
  pub vs_currency: String,
  /// Seconds between cycle starts (fixed period, not backoff).
  #[serde(default = "default_poll_interval")]
  pub poll_interval_secs: u64,
  /// Per-request deadline in seconds; an unmet deadline cancels the
  /// in-flight request.
  #[serde(default = "default_request_timeout")]
  pub request_timeout_secs: u64,
}

/// Metrics and health endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Enable the /live, /ready and /metrics HTTP endpoints.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Port for the health/metrics server.
  #[serde(default = "default_health_port")]
  pub health_port: u16,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      log_level: default_log_level(),
    }
  }
}

impl Default for VisitorConfig {
  fn default() -> Self {
    Self {
      identity: String::new(),
      extra_signatures: Vec::new(),
    }
  }
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self {
      endpoint: default_endpoint(),
      assets: default_assets(),
      vs_currency: default_vs_currency(),
      poll_interval_secs: default_poll_interval(),
      request_timeout_secs: default_request_timeout(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
      health_port: default_health_port(),
    }
  }
}

// Default value functions for serde

fn default_service_name() -> String {
  "ticker-gate".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_endpoint() -> String {
  "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_assets() -> Vec<String> {
  [
    "bitcoin",
    "ethereum",
    "tether",
    "binancecoin",
    "cardano",
    "ripple",
    "solana",
    "polkadot",
    "dogecoin",
    "avalanche",
  ]
  .iter()
  .map(|s| (*s).to_string())
  .collect()
}

fn default_vs_currency() -> String {
  "usd".to_string()
}

fn default_poll_interval() -> u64 {
  60
}

fn default_request_timeout() -> u64 {
  5
}

fn default_true() -> bool {
  true
}

fn default_health_port() -> u16 {
  9090
}
