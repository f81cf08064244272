//! Prometheus Metrics Registry - Feed Observability
//!
//! Registers the metrics exposed on /metrics for dashboards and
//! alerting. Covers poll cycle outcomes, failure reasons, fetch latency,
//! and per-asset quote gauges.

use prometheus::{
    Encoder, Gauge, GaugeVec, Histogram, HistogramOpts, IntCounterVec, Opts,
    Registry, TextEncoder,
};

/// Centralized Prometheus metrics for the price feed.
///
/// All metrics follow the naming convention `ticker_gate_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Poll cycles by outcome (live | fallback).
    pub poll_cycles: IntCounterVec,
    /// Fetch failures by reason (timeout, network, rate_limited, status, data).
    pub feed_failures: IntCounterVec,
    /// Latest quote per asset in USD.
    pub quote_usd: GaugeVec,
    /// Fetch latency in seconds (bounded by the 5 s deadline).
    pub fetch_latency_seconds: Histogram,
    /// Whether the last cycle served live data (1) or the fallback list (0).
    pub feed_live: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let poll_cycles = IntCounterVec::new(
            Opts::new(
                "ticker_gate_poll_cycles_total",
                "Completed poll cycles by outcome",
            ),
            &["outcome"],
        )?;

        let feed_failures = IntCounterVec::new(
            Opts::new(
                "ticker_gate_feed_failures_total",
                "Quote fetch failures by reason",
            ),
            &["reason"],
        )?;

        let quote_usd = GaugeVec::new(
            Opts::new("ticker_gate_quote_usd", "Latest quote per asset in USD"),
            &["asset"],
        )?;

        let fetch_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "ticker_gate_fetch_latency_seconds",
                "Quote fetch latency in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        let feed_live = Gauge::new(
            "ticker_gate_feed_live",
            "Whether the last cycle served live data (1=live, 0=fallback)",
        )?;

        // Register all metrics
        registry.register(Box::new(poll_cycles.clone()))?;
        registry.register(Box::new(feed_failures.clone()))?;
        registry.register(Box::new(quote_usd.clone()))?;
        registry.register(Box::new(fetch_latency_seconds.clone()))?;
        registry.register(Box::new(feed_live.clone()))?;

        Ok(Self {
            registry,
            poll_cycles,
            feed_failures,
            quote_usd,
            fetch_latency_seconds,
            feed_live,
        })
    }

    /// Encode the current metric families in Prometheus text format.
    pub fn encode(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creates_and_encodes() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.poll_cycles.with_label_values(&["live"]).inc();
        metrics.feed_failures.with_label_values(&["timeout"]).inc();
        metrics.quote_usd.with_label_values(&["bitcoin"]).set(65000.0);
        metrics.feed_live.set(1.0);

        let text = metrics.encode();
        assert!(text.contains("ticker_gate_poll_cycles_total"));
        assert!(text.contains("ticker_gate_feed_failures_total"));
        assert!(text.contains("ticker_gate_quote_usd"));
        assert!(text.contains("ticker_gate_feed_live"));
    }
}
