use super::{JsonStore, Result, StoreError, decode, encode};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info};

/// Redis-backed JSON store over a single multiplexed connection
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    redis_url: String,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("redis_url", &self.redis_url)
            .field("conn", &"<MultiplexedConnection>")
            .finish()
    }
}

impl RedisStore {
    /// Connect to `redis_url` and verify the server answers `PING`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the server is unreachable or
    /// the liveness check fails. No other command is sent in that case.
    pub async fn connect_url(redis_url: &str) -> Result<Self> {
        info!(redis_url, "Connecting to Redis");

        let client = redis::Client::open(redis_url)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                error!(redis_url, error = %e, "Failed to open Redis connection");
                StoreError::Connection(e.to_string())
            })?;

        let store = Self {
            conn,
            redis_url: redis_url.to_string(),
        };
        store.ping().await?;

        info!(redis_url, "Redis connection established");
        Ok(store)
    }

    /// Liveness check
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if reply != "PONG" {
            return Err(StoreError::Connection(format!(
                "unexpected PING reply: {}",
                reply
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl JsonStore for RedisStore {
    async fn put(&self, key: &str, value: &Value) -> Result<()> {
        let text = encode(key, value)?;
        let size = text.len();

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, text).await?;

        debug!(key, size, "SET completed");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.conn.clone();
        let text: Option<String> = conn.get(key).await?;

        match text {
            Some(text) => {
                debug!(key, size = text.len(), "GET hit");
                decode(key, &text).map(Some)
            }
            None => {
                debug!(key, "GET miss");
                Ok(None)
            }
        }
    }
}
