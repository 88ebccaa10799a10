//! Item write-through
//!
//! Every item written to the cache is read straight back and compared with
//! the original. The read-back doubles cache round-trips per write but
//! catches corrupted or mis-encoded entries at write time.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheBackend;
use crate::error::CacheError;
use crate::models::Item;

/// Cache key for an item: its decimal id.
pub fn cache_key(id: i64) -> String {
    id.to_string()
}

/// Mirrors items into a [`CacheBackend`] and reads them back by id.
#[derive(Clone)]
pub struct ItemCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl ItemCache {
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Writes `item` and verifies the stored copy. Single attempt.
    pub async fn write_through(&self, item: &Item) -> Result<(), CacheError> {
        self.write(item).await?;
        self.verify(item).await
    }

    /// Serializes `item` and stores it under its key with the configured TTL.
    pub async fn write(&self, item: &Item) -> Result<(), CacheError> {
        let payload = encode(item)?;
        self.backend
            .set(&cache_key(item.id), payload, self.ttl)
            .await
            .map_err(CacheError::Write)
    }

    /// Reads the key of `item` back and checks every field matches.
    pub async fn verify(&self, item: &Item) -> Result<(), CacheError> {
        let cached = self.fetch(item.id).await?;
        if cached != *item {
            return Err(CacheError::Mismatch(cache_key(item.id)));
        }
        Ok(())
    }

    /// Returns the cached item for `id`.
    pub async fn fetch(&self, id: i64) -> Result<Item, CacheError> {
        self.fetch_key(&cache_key(id)).await
    }

    /// Returns the item cached under `key` exactly as given.
    pub async fn fetch_key(&self, key: &str) -> Result<Item, CacheError> {
        let bytes = self
            .backend
            .get(key)
            .await
            .map_err(CacheError::ReadBack)?
            .ok_or_else(|| CacheError::Miss(key.to_string()))?;

        serde_json::from_slice(&bytes).map_err(CacheError::Deserialize)
    }
}

/// JSON has no representation for NaN or infinity; serde_json would write
/// `null` and the entry could never be read back as an item.
fn encode(item: &Item) -> Result<Vec<u8>, CacheError> {
    if !item.price.is_finite() {
        return Err(CacheError::Serialize(format!(
            "price {} is not a finite number",
            item.price
        )));
    }
    serde_json::to_vec(item).map_err(|e| CacheError::Serialize(e.to_string()))
}
