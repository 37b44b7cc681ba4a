//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or filter directive could not be parsed.
    #[error("Invalid log filter `{filter}`: {source}")]
    InvalidFilter {
        /// The rejected directive string.
        filter: String,
        /// Parser error from `tracing-subscriber`.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}
