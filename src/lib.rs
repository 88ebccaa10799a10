//! Items API - A small item CRUD service
//!
//! Items live in a relational store; an optional cache mirrors every write
//! and serves lookups by id.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use service::ItemService;
pub use tasks::spawn_cleanup_task;
