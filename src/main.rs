//! Ticker Gate — Entry Point
//!
//! Initializes configuration, logging, the visitor classifier, and the
//! price feed poller. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Classify the visitor identity once (fixed for the process lifetime)
//! 4. Create the simple-price client (QuoteSource adapter)
//! 5. Spawn the price feed poller (immediate first cycle + fixed period)
//! 6. Spawn health/metrics server (/live, /ready, /metrics)
//! 7. Spawn the render loop (stand-in for the rendering layer)
//! 8. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::SimplePriceClient;
use adapters::metrics::{HealthServer, HealthState, MetricsRegistry};
use domain::classifier::VisitorClassifier;
use usecases::gate::{Experience, ExperienceGate};
use usecases::poller::PriceFeedPoller;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        assets = config.feed.assets.len(),
        interval_secs = config.feed.poll_interval_secs,
        "Starting ticker gate"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Classify the visitor identity (runs exactly once) ─
    let classifier =
        VisitorClassifier::with_extra_signatures(&config.visitor.extra_signatures);
    let is_crawler = classifier.classify(&config.visitor.identity);

    info!(
        crawler = is_crawler,
        signatures = classifier.signature_count(),
        identity = %config.visitor.identity,
        "Visitor classified"
    );

    // ── 5. Create metrics, health state, and the price source ─
    let metrics = Arc::new(
        MetricsRegistry::new().context("Failed to create metrics registry")?,
    );
    let health = Arc::new(HealthState::new());

    let source = Arc::new(
        SimplePriceClient::new(&config.feed)
            .context("Failed to create price API client")?,
    );

    // ── 6. Spawn the price feed poller ──────────────────────
    let poller = Arc::new(PriceFeedPoller::new(
        source,
        &config.feed,
        Arc::clone(&metrics),
        Arc::clone(&health),
    ));
    let gate = ExperienceGate::new(is_crawler, poller.subscribe());

    let poller_shutdown = shutdown_tx.subscribe();
    let poller_ref = Arc::clone(&poller);
    let poller_handle = tokio::spawn(async move {
        if let Err(e) = poller_ref.run(poller_shutdown).await {
            error!(error = %e, "Price feed poller failed");
        }
    });

    // ── 7. Spawn health/metrics server ──────────────────────
    let health_handle = if config.metrics.enabled {
        let server = HealthServer::new(
            Arc::clone(&health),
            Arc::clone(&metrics),
            config.metrics.health_port,
        );
        let server_shutdown = shutdown_tx.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = server.run(server_shutdown).await {
                error!(error = %e, "Health server failed");
            }
        }))
    } else {
        None
    };

    // ── 8. Spawn the render loop ────────────────────────────
    let render_shutdown = shutdown_tx.subscribe();
    let render_handle = tokio::spawn(render_loop(gate, render_shutdown));

    info!("All tasks spawned — service is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    // ── Graceful shutdown ───────────────────────────────────
    let _ = shutdown_tx.send(());

    let _ = tokio::time::timeout(Duration::from_secs(5), poller_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), render_handle).await;
    if let Some(handle) = health_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    info!("Shutdown complete");
    Ok(())
}

/// Log the selected experience - a stand-in for the rendering layer.
///
/// The decoy branch is logged once and never reads the feed; the promo
/// branch re-renders the ticker on every quote refresh.
async fn render_loop(
    mut gate: ExperienceGate,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    if !gate.is_crawler() {
        info!("Rendering decoy branch (human visitor)");
        let _ = shutdown_rx.recv().await;
        return;
    }

    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            view = gate.changed() => {
                match view {
                    Some(Experience::Promo { quotes }) => {
                        let ticker: Vec<String> = quotes
                            .iter()
                            .map(|q| format!("{} ${}", q.symbol, q.price))
                            .collect();
                        info!(entries = ticker.len(), ticker = ?ticker, "Rendering promo ticker");
                    }
                    Some(Experience::Decoy) => {}
                    None => break,
                }
            }
        }
    }
}
