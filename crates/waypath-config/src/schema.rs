//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use waypath_telemetry::LogConfig;

/// File extensions recognized as route files when none are configured.
pub const DEFAULT_ROUTE_EXTENSIONS: &[&str] = &["cjs", "js", "jsx", "mjs", "ts", "tsx"];

/// Router configuration section.
///
/// # Example
///
/// ```
/// use waypath_config::RouterConfig;
///
/// let config = RouterConfig {
///     routes_dir: "api".into(),
///     extensions: vec!["ts".to_string()],
///     strict_params: true,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Directory scanned for route files.
    #[serde(default = "default_routes_dir")]
    pub routes_dir: PathBuf,

    /// Extensions (without the dot) that mark a file as a route file.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Reject routes that give an existing parameter slot a different name.
    #[serde(default)]
    pub strict_params: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            routes_dir: default_routes_dir(),
            extensions: default_extensions(),
            strict_params: false,
        }
    }
}

fn default_routes_dir() -> PathBuf {
    PathBuf::from("routes")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_ROUTE_EXTENSIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production).
    #[default]
    Json,
    /// Pretty format (for development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (e.g., "info", "waypath_router=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in events.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into the subscriber settings used by
    /// [`waypath_telemetry::init_logging`].
    #[must_use]
    pub fn to_log_config(&self, service_name: &str) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            service_name: service_name.to_string(),
            ..LogConfig::default()
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telemetry configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Service name reported in logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TelemetrySection {
    /// Subscriber settings for this service.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        self.logging.to_log_config(&self.service_name)
    }
}

fn default_service_name() -> String {
    "waypath".to_string()
}

fn default_true() -> bool {
    true
}
