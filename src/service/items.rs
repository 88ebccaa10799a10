//! Item Service
//!
//! The store is the source of truth; the cache is a best-effort mirror with
//! no invalidation and no reconciliation. Neither side is locked, so
//! concurrent writers to the same id may interleave their cache and store
//! updates.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::ItemCache;
use crate::error::{AppError, Result};
use crate::models::{Item, NewItem};
use crate::store::ItemStore;

/// Orchestrates the item store and the optional item cache.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    cache: Option<ItemCache>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, cache: Option<ItemCache>) -> Self {
        Self { store, cache }
    }

    /// Service without a cache.
    pub fn store_only(store: Arc<dyn ItemStore>) -> Self {
        Self::new(store, None)
    }

    /// Whether writes are mirrored and lookups by id are available.
    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    // == List ==
    /// Returns all items ordered by id.
    ///
    /// With a cache, every listed item is written through; one failed write
    /// fails the whole listing.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Item>> {
        let items = self.store.list().await?;

        if let Some(cache) = &self.cache {
            for item in &items {
                cache.write_through(item).await?;
            }
            debug!(count = items.len(), "cache populated from listing");
        }

        Ok(items)
    }

    // == Create ==
    /// Inserts `item` and returns the generated id.
    ///
    /// The row stays committed when the cache write fails afterwards.
    #[instrument(skip(self))]
    pub async fn create(&self, item: NewItem) -> Result<i64> {
        let id = self.store.insert(&item).await?;
        let item = item.with_id(id);
        info!(id, "item created");

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.write_through(&item).await {
                warn!(id, error = %e, "item stored but not cached");
                return Err(e.into());
            }
        }

        Ok(id)
    }

    // == Update ==
    /// Replaces name and price of an existing item.
    ///
    /// The cache is written before the store, so a store failure or a missing
    /// row leaves the cache holding the new value.
    #[instrument(skip(self))]
    pub async fn update(&self, item: Item) -> Result<()> {
        if item.id == 0 {
            return Err(AppError::MissingItemId);
        }

        if let Some(cache) = &self.cache {
            cache.write_through(&item).await?;
        }

        let affected = self.store.update(&item).await?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        info!(id = item.id, "item updated");
        Ok(())
    }

    // == Get ==
    /// Returns the item cached under `key`, the id text as the client sent it.
    ///
    /// Reads the cache only; an item never cached or past its TTL is an error
    /// even when the store holds it.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Item> {
        let cache = self.cache.as_ref().ok_or(AppError::CacheDisabled)?;
        Ok(cache.fetch_key(key).await?)
    }
}
