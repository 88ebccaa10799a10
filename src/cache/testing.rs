//! Cache backend test double with injectable faults.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheBackend, MemoryCache};
use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every `set` fails
    RejectWrites,
    /// Every `get` fails
    RejectReads,
    /// `set` reports success but stores nothing
    DropWrites,
    /// Stored values are replaced with bytes that are not JSON
    Garble,
    /// Stored values are valid items with a different name
    Tamper,
}

#[derive(Debug, Clone)]
pub struct FaultyBackend {
    inner: MemoryCache,
    fault: Fault,
}

impl FaultyBackend {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryCache::new(),
            fault,
        }
    }
}

fn refused() -> BackendError {
    ::redis::RedisError::from((::redis::ErrorKind::IoError, "connection refused")).into()
}

#[async_trait]
impl CacheBackend for FaultyBackend {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError> {
        let value = match self.fault {
            Fault::RejectWrites => return Err(refused()),
            Fault::DropWrites => return Ok(()),
            Fault::Garble => b"\x00not json".to_vec(),
            Fault::Tamper => {
                let mut json: serde_json::Value =
                    serde_json::from_slice(&value).expect("item json");
                json["name"] = serde_json::Value::from("tampered");
                serde_json::to_vec(&json).expect("encode")
            }
            Fault::RejectReads => value,
        };
        self.inner.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        if self.fault == Fault::RejectReads {
            return Err(refused());
        }
        self.inner.get(key).await
    }
}
