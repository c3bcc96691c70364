//! Configuration management for postcache
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use postcache::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Caching posts under: {}", config.store.key);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `POSTCACHE__<section>__<key>`
//!
//! Examples:
//! - `POSTCACHE__SOURCE__URL=http://localhost:3000/posts`
//! - `POSTCACHE__STORE__HOST=redis`
//! - `POSTCACHE__STORE__PORT=6380`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/postcache.toml`.
//! This can be overridden using the `POSTCACHE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, ReportConfig, SourceConfig, StoreConfig, TelemetryConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`POSTCACHE__*`)
    /// 2. TOML file (default: `config/postcache.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed. Validation is
    /// left to [`Config::validate`] so command-line overrides can be applied first.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(sources::load()?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        Ok(sources::load_from_sources(path)?)
    }

    /// Validate the loaded configuration, after any overrides were applied
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)?;
        Ok(())
    }
}
