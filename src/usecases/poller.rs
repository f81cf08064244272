//! Price Feed Poller - Recurring Quote Refresh Loop
//!
//! The main feed use case:
//! 1. Fetches quotes through the QuoteSource port
//! 2. Imposes the per-request deadline (cancellation, not retry)
//! 3. Replaces the published list wholesale every cycle
//! 4. Falls back to the fixed default list on any failure
//!
//! Fixed-period polling: the next cycle starts exactly one interval
//! after the previous cycle's start, and the first cycle fires
//! immediately. Failures are logged and counted, never surfaced to
//! readers - the ticker always has a complete list to show.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::adapters::metrics::{HealthState, MetricsRegistry};
use crate::config::FeedConfig;
use crate::domain::quote::{fallback_quotes, PriceQuote};
use crate::ports::quote_source::{FeedError, QuoteSource};

/// Recurring poller that owns the published quote list.
///
/// Exactly one writer: readers subscribe through [`Self::subscribe`] and
/// observe complete lists only - the watch channel swaps the whole value,
/// so a partially updated list is unrepresentable.
pub struct PriceFeedPoller {
    /// Quote provider (HTTP adapter in production, mock in tests).
    source: Arc<dyn QuoteSource>,
    /// Period between cycle starts.
    poll_interval: Duration,
    /// Per-request deadline.
    request_timeout: Duration,
    /// Publisher for the current quote list.
    quotes_tx: watch::Sender<Vec<PriceQuote>>,
    /// Cycle and failure counters.
    metrics: Arc<MetricsRegistry>,
    /// Readiness flags shared with the health server.
    health: Arc<HealthState>,
}

impl PriceFeedPoller {
    /// Create a new poller. The published list starts empty and stays
    /// empty until the first cycle resolves.
    pub fn new(
        source: Arc<dyn QuoteSource>,
        config: &FeedConfig,
        metrics: Arc<MetricsRegistry>,
        health: Arc<HealthState>,
    ) -> Self {
        let (quotes_tx, _) = watch::channel(Vec::new());

        Self {
            source,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            quotes_tx,
            metrics,
            health,
        }
    }

    /// Receiver for the current quote list.
    ///
    /// Empty before the first resolution; afterwards always a complete
    /// list, live or fallback.
    pub fn subscribe(&self) -> watch::Receiver<Vec<PriceQuote>> {
        self.quotes_tx.subscribe()
    }

    /// Run the polling loop until the shutdown signal fires.
    ///
    /// The first cycle runs immediately; each subsequent cycle starts a
    /// fixed interval after the previous cycle's start. A shutdown signal
    /// received mid-cycle drops the in-flight fetch, so no publication
    /// happens after teardown.
    #[instrument(skip(self, shutdown_rx), name = "price_feed_loop")]
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.poll_interval);

        info!(
            interval_secs = self.poll_interval.as_secs(),
            timeout_secs = self.request_timeout.as_secs(),
            "Price feed poller started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                quotes = self.run_cycle() => {
                    self.quotes_tx.send_replace(quotes);
                    self.health.feed_resolved.store(true, Ordering::Relaxed);
                }
            }
        }

        info!("Price feed poller stopped");
        Ok(())
    }

    /// Execute one fetch cycle.
    ///
    /// Collapses every failure (timeout, network, protocol, data) to the
    /// fixed fallback list. Always returns a complete list.
    async fn run_cycle(&self) -> Vec<PriceQuote> {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(
            self.request_timeout,
            self.source.fetch_quotes(),
        )
        .await
        {
            Ok(result) => result,
            // Elapsing the deadline drops the fetch future, which aborts
            // the underlying request.
            Err(_) => Err(FeedError::Timeout),
        };

        let elapsed = started.elapsed();
        self.metrics
            .fetch_latency_seconds
            .observe(elapsed.as_secs_f64());

        match outcome {
            Ok(quotes) => {
                self.metrics.poll_cycles.with_label_values(&["live"]).inc();
                self.metrics.feed_live.set(1.0);
                self.health.feed_live.store(true, Ordering::Relaxed);
                for quote in &quotes {
                    self.metrics
                        .quote_usd
                        .with_label_values(&[quote.id.as_str()])
                        .set(quote.price);
                }
                debug!(
                    assets = quotes.len(),
                    latency_ms = elapsed.as_millis() as u64,
                    "Quote refresh succeeded"
                );
                quotes
            }
            Err(e) => {
                self.metrics
                    .poll_cycles
                    .with_label_values(&["fallback"])
                    .inc();
                self.metrics
                    .feed_failures
                    .with_label_values(&[e.reason()])
                    .inc();
                self.metrics.feed_live.set(0.0);
                self.health.feed_live.store(false, Ordering::Relaxed);

                match e {
                    FeedError::RateLimited => warn!(
                        "Price API rate limited, serving fallback quotes"
                    ),
                    _ => warn!(
                        error = %e,
                        reason = e.reason(),
                        "Quote refresh failed, serving fallback quotes"
                    ),
                }

                fallback_quotes()
            }
        }
    }
}
