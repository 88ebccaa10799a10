//! Redis cache backend

use std::time::Duration;

use ::redis::aio::ConnectionManager;
use async_trait::async_trait;

use crate::cache::CacheBackend;
use crate::error::BackendError;

/// Cache backend talking to a Redis server.
///
/// The connection manager is cheap to clone and reconnects on its own; every
/// request works on its own clone.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to `redis_url`, failing if the server is unreachable.
    pub async fn connect(redis_url: &str) -> Result<Self, BackendError> {
        let client = ::redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        tracing::info!("Connected to Redis at {}", redis_url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError> {
        // PX rejects 0, so clamp to the smallest expiry Redis accepts
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        let mut conn = self.conn.clone();

        ::redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_ms)
            .query_async::<_, ()>(&mut conn)
            .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let mut conn = self.conn.clone();

        let value: Option<Vec<u8>> = ::redis::cmd("GET").arg(key).query_async(&mut conn).await?;

        Ok(value)
    }
}
