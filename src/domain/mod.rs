//! Domain layer - Core business logic and models.
//!
//! Pure logic for the landing gate: visitor classification and the price
//! quote model. No external dependencies allowed here (hexagonal
//! architecture inner ring). All types are serializable and testable in
//! isolation.

pub mod classifier;
pub mod quote;

// Re-export core types for convenience
pub use classifier::VisitorClassifier;
pub use quote::{fallback_quotes, PriceQuote};
