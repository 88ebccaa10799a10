//! In-process item store
//!
//! Mirrors the Postgres semantics: ids start at 1 and are never reused,
//! listing is ordered by id, updates report affected rows.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Item, NewItem};
use crate::store::ItemStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Item>,
    last_id: i64,
}

/// Item store held in memory.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    table: RwLock<Table>,
    closed: AtomicBool,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(sqlx::Error::PoolClosed.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.ensure_open()?;
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn insert(&self, item: &NewItem) -> Result<i64, StoreError> {
        self.ensure_open()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, item.clone().with_id(id));
        Ok(id)
    }

    async fn update(&self, item: &Item) -> Result<u64, StoreError> {
        self.ensure_open()?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&item.id) {
            Some(row) => {
                row.name = item.name.clone();
                row.price = item.price;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
