//! API Module
//!
//! HTTP handlers and routing for the items REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List all items
//! - `GET /api/items/get?id=N` - Cached item by id (cache enabled only)
//! - `POST /api/items/add` - Create an item
//! - `PUT /api/items/update` - Replace an item's name and price
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router};
