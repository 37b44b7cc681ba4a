//! Facade error types.

use std::path::PathBuf;

use http::Method;
use thiserror::Error;
use waypath_router::RouteError;
use waypath_telemetry::TelemetryError;

/// Errors raised while listing route files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory under the routes root could not be listed.
    #[error("failed to read route directory {path}")]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while assembling an [`App`](crate::App).
#[derive(Debug, Error)]
pub enum AppError {
    /// A pattern was rejected by the trie.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Route discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A route file was registered without any handler.
    #[error("route {route_path}: must provide at least one HTTP method (GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD)")]
    NoMethods {
        /// Route file path relative to the routes directory.
        route_path: String,
    },

    /// A route file provided a handler for a method outside the standard set.
    #[error("route {route_path}: unsupported HTTP method {method}")]
    UnsupportedMethod {
        /// Route file path relative to the routes directory.
        route_path: String,
        /// The rejected method.
        method: Method,
    },

    /// Logging could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Result type for facade operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_methods_display() {
        let err = AppError::NoMethods {
            route_path: "users/[id].ts".to_string(),
        };
        assert!(err.to_string().contains("users/[id].ts"));
    }

    #[test]
    fn test_unsupported_method_display() {
        let err = AppError::UnsupportedMethod {
            route_path: "users.ts".to_string(),
            method: Method::TRACE,
        };
        assert!(err.to_string().contains("TRACE"));
    }

    #[test]
    fn test_route_error_is_transparent() {
        let route = RouteError::ConflictingParam {
            pattern: "/users/:name".to_string(),
            existing: "id".to_string(),
            new: "name".to_string(),
        };
        let expected = route.to_string();
        let err = AppError::from(route);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_read_dir_has_source() {
        let err = DiscoveryError::ReadDir {
            path: PathBuf::from("routes"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
