//! Service Module
//!
//! Item operations over the store, mirrored into the cache when one is
//! configured.

mod items;

pub use items::ItemService;
