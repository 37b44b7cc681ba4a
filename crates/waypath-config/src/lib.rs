//! Typed configuration for Waypath.
//!
//! Configuration is loaded in layers, later layers overriding earlier ones:
//! built-in defaults, then a TOML or JSON file, then `.env`, then
//! `WAYPATH__SECTION__KEY` environment variables. Unknown fields are
//! rejected so that a misspelt key fails loudly instead of being ignored.
//!
//! - [`RouterConfig`] - route discovery and parameter policy
//! - [`TelemetrySection`] - service name and logging
//!
//! # Example
//!
//! ```no_run
//! use waypath_config::ConfigLoader;
//!
//! # fn main() -> Result<(), waypath_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("waypath.toml")?
//!     .with_env_prefix("WAYPATH")
//!     .load()?;
//!
//! println!("Routes are read from: {}", config.router.routes_dir.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! routes_dir = "routes"
//! extensions = ["ts", "js"]
//! strict_params = true
//!
//! [telemetry]
//! service_name = "my-service"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info,waypath_router=debug"
//! format = "pretty"
//! include_location = false
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `WAYPATH__ROUTER__ROUTES_DIR=./api`
//! - `WAYPATH__ROUTER__EXTENSIONS=ts,tsx`
//! - `WAYPATH__ROUTER__STRICT_PARAMS=true`
//! - `WAYPATH__TELEMETRY__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
