use super::{JsonStore, Result, decode, encode};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process store keeping serialized text, so reads go through the same
/// parse path as Redis
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write raw text under `key`, bypassing serialization
    pub async fn put_raw(&self, key: &str, text: impl Into<String>) {
        self.entries.lock().await.insert(key.to_string(), text.into());
    }

    /// Raw text under `key`, if any
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl JsonStore for MemoryStore {
    async fn put(&self, key: &str, value: &Value) -> Result<()> {
        let text = encode(key, value)?;
        tracing::debug!(key, size = text.len(), "Memory store put");
        self.entries.lock().await.insert(key.to_string(), text);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let text = self.entries.lock().await.get(key).cloned();
        text.map(|text| decode(key, &text)).transpose()
    }
}
