//! Remote post source
//!
//! One GET per call, no retry. The response body is returned as an untyped
//! JSON value; decoding into [`crate::posts::Post`] happens after the cache
//! round trip.

pub mod http;

pub use http::{HttpConfig, HttpFetcher};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Non-success status or network failure
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Status { .. } | FetchError::Transport(_) | FetchError::Timeout
        )
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Source of the raw posts document
#[async_trait]
pub trait PostFetcher: Send + Sync {
    /// Perform exactly one request and parse the body as JSON
    async fn fetch(&self) -> Result<Value>;
}
