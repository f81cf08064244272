//! Health Check Server - Liveness, Readiness and Metrics Endpoints
//!
//! Exposes /live, /ready and /metrics via axum 0.7 for Docker health
//! checks and scrapers. Readiness means the first poll cycle has
//! resolved, so there is always a complete quote list to render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use super::prometheus::MetricsRegistry;

/// Shared health state polled by readiness probes.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Whether the first poll cycle has resolved (live or fallback).
    pub feed_resolved: Arc<AtomicBool>,
    /// Whether the last cycle served live data.
    pub feed_live: Arc<AtomicBool>,
}

impl HealthState {
    /// Create a new health state (nothing resolved yet).
    pub fn new() -> Self {
        Self {
            feed_resolved: Arc::new(AtomicBool::new(false)),
            feed_live: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if the service is ready: some quote list exists.
    ///
    /// Fallback data counts as ready - a failed feed degrades the
    /// content, never the service.
    pub fn is_ready(&self) -> bool {
        self.feed_resolved.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state for the probe handlers.
#[derive(Clone)]
struct ServerState {
    health: Arc<HealthState>,
    metrics: Arc<MetricsRegistry>,
}

/// Axum-based health and metrics HTTP server.
pub struct HealthServer {
    /// Health state shared with the poller.
    health: Arc<HealthState>,
    /// Metrics registry backing /metrics.
    metrics: Arc<MetricsRegistry>,
    /// Bind port (from config).
    port: u16,
}

impl HealthServer {
    /// Create a new health server.
    pub fn new(
        health: Arc<HealthState>,
        metrics: Arc<MetricsRegistry>,
        port: u16,
    ) -> Self {
        Self {
            health,
            metrics,
            port,
        }
    }

    /// Run the server until the shutdown signal fires.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(
        self,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let state = ServerState {
            health: Arc::clone(&self.health),
            metrics: Arc::clone(&self.metrics),
        };

        let app = Router::new()
            .route("/live", get(Self::liveness))
            .route("/ready", get(Self::readiness))
            .route("/metrics", get(Self::metrics))
            .with_state(state);

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(address = %addr, "Health server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }

    /// Liveness probe: always returns 200 if the process is running.
    async fn liveness() -> impl IntoResponse {
        (StatusCode::OK, "OK")
    }

    /// Readiness probe: returns 200 once the first cycle has resolved.
    async fn readiness(State(state): State<ServerState>) -> impl IntoResponse {
        if state.health.is_ready() {
            (StatusCode::OK, "READY")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }

    /// Prometheus text exposition.
    async fn metrics(State(state): State<ServerState>) -> impl IntoResponse {
        (StatusCode::OK, state.metrics.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_before_first_resolution() {
        let health = HealthState::new();
        assert!(!health.is_ready());
    }

    #[test]
    fn test_ready_after_resolution_even_on_fallback() {
        let health = HealthState::new();
        health.feed_resolved.store(true, Ordering::Relaxed);
        health.feed_live.store(false, Ordering::Relaxed);
        assert!(health.is_ready());
    }
}
