use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    #[error("Unsupported source URL scheme '{scheme}', expected 'http' or 'https'")]
    UnsupportedScheme { scheme: String },

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },

    #[error("Store host must not be empty")]
    EmptyStoreHost,

    #[error("Store port must be non-zero")]
    InvalidStorePort,

    #[error("Cache key must not be empty")]
    EmptyCacheKey,

    #[error("Chart output path must not be empty")]
    EmptyChartPath,

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_source(config)?;
    validate_store(config)?;
    validate_report(config)?;
    validate_telemetry(config)?;
    Ok(())
}

fn validate_source(config: &Config) -> Result<(), ValidationError> {
    let url = reqwest::Url::parse(&config.source.url).map_err(|e| {
        ValidationError::InvalidSourceUrl {
            url: config.source.url.clone(),
            reason: e.to_string(),
        }
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if config.source.connect_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "connect_timeout_secs".to_string(),
            value: 0,
        });
    }

    if config.source.request_timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "request_timeout_secs".to_string(),
            value: 0,
        });
    }

    Ok(())
}

fn validate_store(config: &Config) -> Result<(), ValidationError> {
    if config.store.host.trim().is_empty() {
        return Err(ValidationError::EmptyStoreHost);
    }

    if config.store.port == 0 {
        return Err(ValidationError::InvalidStorePort);
    }

    if config.store.key.is_empty() {
        return Err(ValidationError::EmptyCacheKey);
    }

    Ok(())
}

fn validate_report(config: &Config) -> Result<(), ValidationError> {
    if config.report.chart_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyChartPath);
    }

    Ok(())
}

fn validate_telemetry(config: &Config) -> Result<(), ValidationError> {
    if !crate::observability::is_valid_filter(&config.telemetry.log_filter) {
        return Err(ValidationError::InvalidLogFilter(
            config.telemetry.log_filter.clone(),
        ));
    }

    Ok(())
}
