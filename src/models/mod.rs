//! Item entity and the request/response bodies of the HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{Item, NewItem};
pub use requests::{CreateItemRequest, GetItemQuery, UpdateItemRequest};
pub use responses::{CreatedResponse, HealthResponse, MessageResponse};
