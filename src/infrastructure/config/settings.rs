//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; secrets never live in the file.
//! Exchange API keys are read per provider from `APP_<PROVIDER>_API_*` at
//! runtime and the Redis URL may be supplied through `EXGATE_REDIS_URL`.
//!
//! # Example
//!
//! ```no_run
//! use exgate::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::gateway::GatewayConfig;
use super::logging::LoggingConfig;
use super::manager::ManagerConfig;
use super::store::{BanStoreBackend, BanStoreConfig, CatalogConfig};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `ban_store.redis_url`.
pub const REDIS_URL_ENV: &str = "EXGATE_REDIS_URL";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry, circuit breaker and ban tuning.
    #[serde(default)]
    pub manager: ManagerConfig,

    /// HTTP gateway endpoints per provider.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Provider catalog database.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Ban store backend.
    #[serde(default)]
    pub ban_store: BanStoreConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(url) = std::env::var(REDIS_URL_ENV) {
            if !url.trim().is_empty() {
                config.ban_store.redis_url = Some(url);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the content is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let manager = &self.manager;
        if manager.circuit_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "circuit_threshold",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if manager.circuit_window_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "circuit_window_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if manager.rate_limit_ban_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit_ban_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if manager.credential_test_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "credential_test_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if manager.ban_key.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "ban_key" }.into());
        }

        if self.gateway.timeout_ms == 0 || self.gateway.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        for (name, provider) in &self.gateway.providers {
            if provider.base_url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: format!("provider '{name}' has an empty base_url"),
                }
                .into());
            }
        }

        if self.catalog.database_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url",
            }
            .into());
        }

        if self.ban_store.backend == BanStoreBackend::Redis
            && self
                .ban_store
                .redis_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigError::MissingField { field: "redis_url" }.into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.manager.retry_budget, 3);
        assert_eq!(config.manager.circuit_threshold, 3);
        assert_eq!(config.manager.circuit_window_secs, 1800);
        assert_eq!(config.manager.rate_limit_ban_secs, 60);
        assert_eq!(config.manager.credential_test_timeout_secs, 30);
        assert_eq!(config.ban_store.backend, BanStoreBackend::Memory);
        assert_eq!(config.catalog.database_url, "exgate.db");
    }

    #[test]
    fn parses_gateway_providers() {
        let config = Config::parse_toml(
            r#"
            [gateway]
            timeout_ms = 2000

            [gateway.providers.binance]
            base_url = "https://gw.example.com/binance"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.timeout_ms, 2000);
        assert_eq!(
            config.gateway.providers["binance"].base_url,
            "https://gw.example.com/binance"
        );
    }

    #[test]
    fn rejects_zero_circuit_threshold() {
        let result = Config::parse_toml(
            r#"
            [manager]
            circuit_threshold = 0
            "#,
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "circuit_threshold",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_base_url() {
        let result = Config::parse_toml(
            r#"
            [gateway.providers.kraken]
            base_url = ""
            "#,
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "base_url",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[manager");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
