//! API configuration.
//!
//! Values are layered with the `config` crate: built-in defaults, then
//! `config/default.*`, then `config/{APP_ENV}.*`, then `COMPASS_*`
//! environment variables (`__` separates nested keys).

use anyhow::Context;
use compass_common::TelemetryConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix for environment overrides
const ENV_PREFIX: &str = "COMPASS";

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// Base path the versioned routes are mounted under
    pub api_base_path: String,

    /// API version segment
    pub api_version: String,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Enable OpenAPI documentation
    pub enable_swagger: bool,

    /// Logging setup
    pub telemetry: TelemetryConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_base_path: "/api".to_string(),
            api_version: "v1".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            max_body_size: 2 * 1024 * 1024, // 2 MB
            request_timeout_seconds: 30,
            enable_swagger: true,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(
                Config::try_from(&ApiConfig::default())
                    .context("Failed to serialize default configuration")?,
            )
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", app_env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let api_config: ApiConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        api_config.validate()?;

        Ok(api_config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("Server port must be non-zero");
        }

        if self.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be at least one second");
        }

        if !self.api_base_path.starts_with('/') {
            anyhow::bail!(
                "API base path '{}' must start with '/'",
                self.api_base_path
            );
        }

        if self.api_version.trim().is_empty() {
            anyhow::bail!("API version must not be empty");
        }

        self.telemetry.validate()?;

        Ok(())
    }

    /// Prefix the data source routes are nested under, e.g. `/api/v1`
    pub fn api_prefix(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_path.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_prefix(), "/api/v1");
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_api_prefix_normalizes_slashes() {
        let config = ApiConfig {
            api_base_path: "/compass/".to_string(),
            api_version: "/v2".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_prefix(), "/compass/v2");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_port = ApiConfig {
            port: 0,
            ..Default::default()
        };
        assert!(zero_port.validate().is_err());

        let zero_timeout = ApiConfig {
            request_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let relative_base = ApiConfig {
            api_base_path: "api".to_string(),
            ..Default::default()
        };
        assert!(relative_base.validate().is_err());

        let blank_version = ApiConfig {
            api_version: " ".to_string(),
            ..Default::default()
        };
        assert!(blank_version.validate().is_err());

        let mut bad_level = ApiConfig::default();
        bad_level.telemetry.log_level = "loud".to_string();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.telemetry.log_level, "info");
    }
}
