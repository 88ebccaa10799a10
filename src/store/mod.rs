//! Store Module
//!
//! The relational store is the source of truth for items.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Item, NewItem};

pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;

/// Persistence operations the service needs.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns every item ordered by ascending id.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Inserts a row and returns the generated id.
    async fn insert(&self, item: &NewItem) -> Result<i64, StoreError>;

    /// Replaces name and price of the row with `item.id`.
    ///
    /// Returns the number of affected rows.
    async fn update(&self, item: &Item) -> Result<u64, StoreError>;

    /// Releases the underlying connections.
    async fn close(&self);
}
