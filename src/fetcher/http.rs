//! reqwest-backed fetcher

use super::{FetchError, PostFetcher, Result};
use crate::config::SourceConfig;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            user_agent: "postcache/0.1.0".to_string(),
        }
    }
}

impl From<&SourceConfig> for HttpConfig {
    fn from(source: &SourceConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(source.connect_timeout_secs),
            request_timeout: Duration::from_secs(source.request_timeout_secs),
            user_agent: source.user_agent.clone(),
        }
    }
}

/// Fetches the posts document from a fixed URL
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_source(source: &SourceConfig) -> Result<Self> {
        Self::new(source.url.clone(), HttpConfig::from(source))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_body(&self) -> Result<Bytes> {
        debug!(url = %self.url, "Starting request");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Request returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("Failed to read body: {}", e)))?;

        debug!(url = %self.url, size = bytes.len(), "Request completed");

        Ok(bytes)
    }
}

#[async_trait]
impl PostFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Value> {
        let body = self.get_body().await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}
