//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, metrics export). Each sub-module
//! groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: simple-price REST client for the public price API
//! - `metrics`: Prometheus metrics export and health checks

pub mod api;
pub mod metrics;
