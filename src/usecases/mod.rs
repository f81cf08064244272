//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! service's core workflows. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `PriceFeedPoller`: recurring quote refresh loop with fallback
//! - `ExperienceGate`: landing branch selection for the rendering layer

pub mod gate;
pub mod poller;

pub use gate::{Experience, ExperienceGate};
pub use poller::PriceFeedPoller;
