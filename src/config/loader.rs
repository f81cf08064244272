//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    assets = config.feed.assets.len(),
    interval_secs = config.feed.poll_interval_secs,
    timeout_secs = config.feed.request_timeout_secs,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty endpoint, currency, and asset identifiers
/// - A positive polling period that exceeds the request deadline
/// - Non-empty extra classifier signatures
fn validate_config(config: &AppConfig) -> Result<()> {
  // Feed validation
  anyhow::ensure!(
    !config.feed.endpoint.is_empty(),
    "Price API endpoint must not be empty"
  );
  anyhow::ensure!(
    !config.feed.vs_currency.is_empty(),
    "Quote currency must not be empty"
  );
  anyhow::ensure!(
    !config.feed.assets.is_empty(),
    "At least one asset must be configured"
  );

  for (i, asset) in config.feed.assets.iter().enumerate() {
    anyhow::ensure!(!asset.is_empty(), "Asset {} has an empty identifier", i);
    anyhow::ensure!(
      !asset.contains(','),
      "Asset {} ({}) must not contain a comma",
      i,
      asset
    );
  }

  anyhow::ensure!(
    config.feed.poll_interval_secs > 0,
    "poll_interval_secs must be positive, got {}",
    config.feed.poll_interval_secs
  );
  anyhow::ensure!(
    config.feed.request_timeout_secs > 0,
    "request_timeout_secs must be positive, got {}",
    config.feed.request_timeout_secs
  );
  anyhow::ensure!(
    config.feed.request_timeout_secs < config.feed.poll_interval_secs,
    "request_timeout_secs ({}) must be less than poll_interval_secs ({})",
    config.feed.request_timeout_secs,
    config.feed.poll_interval_secs
  );

  // Classifier validation: an empty signature would match every identity
  for sig in &config.visitor.extra_signatures {
    anyhow::ensure!(
      !sig.trim().is_empty(),
      "Extra crawler signatures must not be empty"
    );
  }

  Ok(())
}
