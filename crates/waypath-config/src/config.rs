//! Main configuration types.
//!
//! This module provides the top-level [`WaypathConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{RouterConfig, TelemetrySection};

/// Complete Waypath configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use waypath_config::WaypathConfig;
///
/// let config = WaypathConfig::default();
/// assert!(!config.router.strict_params);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct WaypathConfig {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl WaypathConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> WaypathConfigBuilder {
        WaypathConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `router.extensions` is empty or holds an extension that is not a
    ///   bare alphanumeric suffix
    /// - `telemetry.service_name` is empty
    /// - logging is enabled and `telemetry.logging.level` is not a valid
    ///   filter directive
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.router.extensions.is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "router.extensions",
                "at least one extension is required",
            ));
        }

        if let Some(bad) = self
            .router
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphanumeric()))
        {
            return Err(crate::ConfigError::invalid_value(
                "router.extensions",
                format!("`{bad}` is not a file extension (omit the leading dot)"),
            ));
        }

        if self.telemetry.service_name.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "telemetry.service_name",
                "must not be empty",
            ));
        }

        if self.telemetry.logging.enabled {
            waypath_telemetry::create_env_filter(&self.telemetry.logging.level).map_err(|e| {
                crate::ConfigError::invalid_value("telemetry.logging.level", e.to_string())
            })?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, debug-level logs with source locations and strict parameter
    /// names, so route conflicts surface early.
    ///
    /// # Example
    ///
    /// ```
    /// use waypath_config::WaypathConfig;
    ///
    /// let config = WaypathConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = crate::LogFormat::Pretty;
        config.telemetry.logging.include_location = true;

        config.router.strict_params = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// # Example
    ///
    /// ```
    /// use waypath_config::WaypathConfig;
    ///
    /// let config = WaypathConfig::production();
    /// assert_eq!(config.telemetry.logging.format, waypath_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = crate::LogFormat::Json;
        config.telemetry.logging.include_location = false;

        config
    }
}

/// Builder for [`WaypathConfig`].
#[derive(Debug, Default)]
pub struct WaypathConfigBuilder {
    router: Option<RouterConfig>,
    telemetry: Option<TelemetrySection>,
}

impl WaypathConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the router configuration.
    #[must_use]
    pub fn router(mut self, router: RouterConfig) -> Self {
        self.router = Some(router);
        self
    }

    /// Set the telemetry configuration.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetrySection) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> WaypathConfig {
        WaypathConfig {
            router: self.router.unwrap_or_default(),
            telemetry: self.telemetry.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<WaypathConfig, crate::ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggingConfig;

    #[test]
    fn test_default_config() {
        let config = WaypathConfig::default();
        assert_eq!(config.telemetry.service_name, "waypath");
        assert_eq!(config.router.extensions.len(), 6);
    }

    #[test]
    fn test_builder_all_sections() {
        let config = WaypathConfig::builder()
            .router(RouterConfig {
                routes_dir: "api".into(),
                ..Default::default()
            })
            .telemetry(TelemetrySection {
                service_name: "my-service".to_string(),
                ..Default::default()
            })
            .build();

        assert_eq!(config.router.routes_dir, std::path::PathBuf::from("api"));
        assert_eq!(config.telemetry.service_name, "my-service");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(WaypathConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_extensions() {
        let config = WaypathConfig::builder()
            .router(RouterConfig {
                extensions: Vec::new(),
                ..Default::default()
            })
            .build();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router.extensions"));
    }

    #[test]
    fn test_validate_dotted_extension() {
        let config = WaypathConfig::builder()
            .router(RouterConfig {
                extensions: vec![".ts".to_string()],
                ..Default::default()
            })
            .build();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_service_name() {
        let config = WaypathConfig::builder()
            .telemetry(TelemetrySection {
                service_name: "  ".to_string(),
                ..Default::default()
            })
            .build();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("service_name"));
    }

    #[test]
    fn test_validate_bad_log_level() {
        let config = WaypathConfig::builder()
            .telemetry(TelemetrySection {
                logging: LoggingConfig {
                    level: "waypath=shout".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .build();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telemetry.logging.level"));
    }

    #[test]
    fn test_validate_skips_level_when_logging_disabled() {
        let config = WaypathConfig::builder()
            .telemetry(TelemetrySection {
                logging: LoggingConfig {
                    enabled: false,
                    level: "waypath=shout".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .build();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_preset() {
        let config = WaypathConfig::development();
        assert_eq!(config.telemetry.logging.format, crate::LogFormat::Pretty);
        assert!(config.telemetry.logging.include_location);
        assert!(config.router.strict_params);
    }

    #[test]
    fn test_production_preset() {
        let config = WaypathConfig::production();
        assert_eq!(config.telemetry.logging.level, "info");
        assert_eq!(config.telemetry.logging.format, crate::LogFormat::Json);
        assert!(!config.router.strict_params);
    }

    #[test]
    fn test_build_validated_failure() {
        let result = WaypathConfig::builder()
            .router(RouterConfig {
                extensions: Vec::new(),
                ..Default::default()
            })
            .build_validated();

        assert!(result.is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = WaypathConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[router]"));
        assert!(toml_str.contains("[telemetry.logging]"));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            [router]
            routes_dir = "src/routes"

            [telemetry]
            service_name = "test-service"
        "#;

        let config: WaypathConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.router.routes_dir, std::path::PathBuf::from("src/routes"));
        assert_eq!(config.telemetry.service_name, "test-service");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml_str = r#"
            [router]
            routes_dir = "routes"
            unknown_field = "value"
        "#;

        let result: Result<WaypathConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }
}
