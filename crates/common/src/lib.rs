//! Common utilities shared across the Compass crates.
//!
//! Currently this is the telemetry bootstrap: every binary calls
//! [`init_tracing`] once with its [`TelemetryConfig`].

pub mod telemetry;

pub use telemetry::{init_tracing, TelemetryConfig};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
