//! API Handlers
//!
//! HTTP request handlers for each items endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::{
    CreateItemRequest, CreatedResponse, GetItemQuery, HealthResponse, Item, MessageResponse,
    UpdateItemRequest,
};
use crate::service::ItemService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemService>,
    /// Whether GET /api/items/get is routed
    pub serve_lookup: bool,
}

impl AppState {
    /// Creates a new AppState around the given service.
    ///
    /// Lookup by id is served whenever the service has a cache.
    pub fn new(items: ItemService) -> Self {
        let serve_lookup = items.has_cache();
        Self {
            items: Arc::new(items),
            serve_lookup,
        }
    }

    /// Turns lookup by id off while keeping writes mirrored into the cache.
    ///
    /// Lookup cannot be turned on for a service without a cache.
    pub fn with_lookup(mut self, enabled: bool) -> Self {
        self.serve_lookup = enabled && self.items.has_cache();
        self
    }
}

/// Handler for GET /api/items
pub async fn list_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    let items = state.items.list().await?;
    Ok(Json(items))
}

/// Handler for GET /api/items/get?id=N
///
/// Served from the cache only. The query is taken as raw pairs so a
/// repeated `id` cannot fail extraction.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Item>> {
    let query = GetItemQuery::from_pairs(pairs);
    let item = state.items.get(query.key()?).await?;
    Ok(Json(item))
}

/// Handler for POST /api/items/add
///
/// The body is decoded by hand so every payload error is a 400.
pub async fn add_item_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let req = CreateItemRequest::from_slice(&body)?;
    let id = state.items.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// Handler for PUT /api/items/update
pub async fn update_item_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let item = UpdateItemRequest::from_slice(&body)?.validate()?;
    state.items.update(item).await?;
    Ok(Json(MessageResponse::updated()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
