//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SERVFARMA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use servfarma_admin::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.api.base_url);
//! ```

mod api;
mod error;
mod listing;
mod logging;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use listing::ListingConfig;
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration against a local API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// REST API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Page sizes and snapshot reuse
    #[serde(default)]
    pub listing: ListingConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SERVFARMA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SERVFARMA__API__BASE_URL=https://...` -> `api.base_url = ...`
    /// - `SERVFARMA__LISTING__DEFAULT_PAGE_SIZE=25` -> `listing.default_page_size = 25`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SERVFARMA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.listing.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SERVFARMA__API__BASE_URL",
        "SERVFARMA__API__TIMEOUT_SECS",
        "SERVFARMA__API__AUTH_TOKEN",
        "SERVFARMA__LISTING__DEFAULT_PAGE_SIZE",
        "SERVFARMA__LISTING__SNAPSHOT_MAX_AGE_SECS",
        "SERVFARMA__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.listing.default_page_size, 10);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SERVFARMA__API__BASE_URL", "https://api.servfarma.com/v1");
        env::set_var("SERVFARMA__API__TIMEOUT_SECS", "15");
        env::set_var("SERVFARMA__API__AUTH_TOKEN", "secret-token");
        env::set_var("SERVFARMA__LISTING__DEFAULT_PAGE_SIZE", "25");
        env::set_var("SERVFARMA__LISTING__SNAPSHOT_MAX_AGE_SECS", "600");
        env::set_var("SERVFARMA__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://api.servfarma.com/v1");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(
            config.api.auth_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("secret-token")
        );
        assert_eq!(config.listing.default_page_size, 25);
        assert_eq!(config.listing.snapshot_max_age_secs, Some(600));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SERVFARMA__API__TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
