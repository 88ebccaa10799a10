//! Cache Module
//!
//! Key-value backends with TTL support and the item write-through layer
//! built on top of them.

mod entry;
mod items;
mod memory;
mod redis;
mod store;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BackendError;

// Re-export public types
pub use self::redis::RedisCache;
pub use entry::CacheEntry;
pub use items::{cache_key, ItemCache};
pub use memory::MemoryCache;
pub use store::CacheStore;

// == Public Constants ==
/// Expiration applied to cached items unless configured otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Raw key-value operations a cache must offer.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError>;

    /// Returns the live value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;
}
