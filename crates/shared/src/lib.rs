//! # Rolegate Shared
//!
//! Ambient pieces used by every binary: configuration loading and
//! tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-exports
pub use config::*;
pub use error::*;
pub use telemetry::init_tracing;
