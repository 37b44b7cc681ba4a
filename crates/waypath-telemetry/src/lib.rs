//! Structured logging for Waypath.
//!
//! Waypath crates emit events through the `tracing` macros and never install
//! a subscriber themselves. Applications call [`init_logging`] once at
//! startup to route those events to stdout:
//!
//! ```text
//!  waypath-router ──┐
//!                   ├──► tracing ──► EnvFilter ──► fmt layer (json | pretty)
//!  waypath ─────────┘
//! ```
//!
//! | Event                                   | Level   |
//! |-----------------------------------------|---------|
//! | route registered                        | `debug` |
//! | segments after a wildcard ignored       | `debug` |
//! | parameter slot shared by two names      | `warn`  |
//! | route file discovered                   | `debug` |
//! | lookup miss                             | `trace` |
//!
//! # Example
//!
//! ```rust,no_run
//! use waypath_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).unwrap();
//! tracing::info!(routes = 12, "router ready");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
