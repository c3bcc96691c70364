//! JSON cache backed by a key-value store
//!
//! Values are written as compact JSON text under a single key and parsed
//! back on read. Two backends:
//!
//! - [`RedisStore`] - one multiplexed connection, liveness-checked on connect
//! - [`MemoryStore`] - in-process map for tests and `--memory-store` runs

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt data under key '{key}': {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Key-value store holding JSON documents as text
#[async_trait]
pub trait JsonStore: Send + Sync {
    /// Serialize `value` and write it under `key`, replacing any prior value
    async fn put(&self, key: &str, value: &Value) -> Result<()>;

    /// Read and parse the value under `key`; `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<Value>>;
}

pub(crate) fn encode(key: &str, value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })
}

pub(crate) fn decode(key: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| StoreError::CorruptData {
        key: key.to_string(),
        source,
    })
}
