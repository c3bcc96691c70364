use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "POSTCACHE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/postcache.toml";
const ENV_PREFIX: &str = "POSTCACHE";
const ENV_SEPARATOR: &str = "__";

/// Resolve the configuration file path, honoring `POSTCACHE_CONFIG`
pub fn default_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    load_from_sources(default_path())
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // POSTCACHE__STORE__PORT -> store.port
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.store.port, 6379);
        assert_eq!(config.store.key, "jsonplaceholder:posts");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[source]
url = "http://127.0.0.1:9000/posts"
request_timeout_secs = 5

[store]
host = "redis.test"
port = 6380
key = "test:posts"

[report]
chart_path = "out/chart.svg"
search_user_id = 3

[telemetry]
log_filter = "debug"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.source.url, "http://127.0.0.1:9000/posts");
        assert_eq!(config.source.request_timeout_secs, 5);
        assert_eq!(config.source.connect_timeout_secs, 10);
        assert_eq!(config.store.host, "redis.test");
        assert_eq!(config.store.port, 6380);
        assert_eq!(config.store.key, "test:posts");
        assert_eq!(config.report.chart_path, PathBuf::from("out/chart.svg"));
        assert_eq!(config.report.search_user_id, 3);
        assert_eq!(config.telemetry.log_filter, "debug");
    }

    #[test]
    fn test_malformed_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[store\nport = ").unwrap();

        assert!(load_from_sources(config_path).is_err());
    }
}
