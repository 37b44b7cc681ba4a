//! # Waypath
//!
//! **File-based HTTP routing on a segment trie**
//!
//! Waypath turns a directory of route files into a routing table and
//! resolves requests against it:
//!
//! - 📁 **File-based routes** – `users/[id].ts` becomes `/users/:id`
//! - 🌲 **Segment trie** – static, parameter and wildcard segments with backtracking
//! - ⚡ **Static fast path** – parameterless routes resolve with one hash lookup
//! - 🔎 **Regex constraints** – `:id(\d+)` with named capture groups
//! - 🚫 **405 detection** – tell a missing path apart from a missing method
//! - 🧅 **Scoped middleware** – global, prefix (`/api/**`) or exact-path registration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http::Method;
//! use waypath::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("waypath.toml")?
//!     .with_env_prefix("WAYPATH")
//!     .load()?;
//! waypath::init_logging(&config)?;
//!
//! let mut builder: AppBuilder<String> = AppBuilder::from_config(config.router);
//! builder.discover(|file| vec![(Method::GET, file.pattern.clone())])?;
//! builder.static_mount("/assets", "static".to_string())?;
//! let app = builder.build();
//!
//! match app.resolve(&Method::GET, "/users/42") {
//!     Resolution::Matched(m) => println!("{} {:?}", m.handler(), m.params),
//!     Resolution::MethodNotAllowed { allowed } => println!("405, allow {allowed:?}"),
//!     Resolution::NotFound => println!("404"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! routes/ ──► discovery ──► AppBuilder ──► App ──► resolve(method, path)
//!                              │                       │
//!                         PathTrie::add          PathTrie::find
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod discovery;
mod error;
pub mod middleware;

pub use app::{App, AppBuilder, Resolution, RouteKind, RouteMatch, RouteMeta, STANDARD_METHODS};
pub use discovery::{pattern_from_route_path, scan_route_files, RouteFile};
pub use error::{AppError, AppResult, DiscoveryError};
pub use middleware::MiddlewareScope;

// Re-export the building blocks
pub use waypath_config as config;
pub use waypath_router as router;
pub use waypath_telemetry as telemetry;

/// Installs the global log subscriber described by `config.telemetry`.
///
/// # Errors
///
/// Returns [`AppError::Telemetry`] if the filter is invalid or a subscriber
/// is already installed.
pub fn init_logging(config: &waypath_config::WaypathConfig) -> AppResult<()> {
    waypath_telemetry::init_logging(&config.telemetry.log_config())?;
    Ok(())
}

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use waypath::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{App, AppBuilder, Resolution, RouteKind, RouteMatch, RouteMeta};
    pub use crate::discovery::RouteFile;
    pub use crate::error::{AppError, AppResult};
    pub use crate::middleware::MiddlewareScope;

    pub use waypath_config::{ConfigLoader, RouterConfig, WaypathConfig};
    pub use waypath_router::{Params, ParamPolicy, PathTrie, RouteError};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_disabled() {
        let mut config = waypath_config::WaypathConfig::default();
        config.telemetry.logging.enabled = false;
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_reexports() {
        let trie: router::PathTrie<()> = router::PathTrie::new();
        assert!(trie.is_empty());
        assert!(!config::WaypathConfig::default().router.strict_params);
        assert!(telemetry::LogConfig::default().enabled);
    }
}
