//! API Routes
//!
//! Configures the Axum router with all items endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    add_item_handler, get_item_handler, health_handler, list_items_handler, update_item_handler,
    AppState,
};

/// CORS policy admitting a single origin.
///
/// DELETE is allowed by the policy although no route handles it.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Creates the main router with all endpoints configured.
///
/// `GET /api/items/get` is only wired when `state.serve_lookup` is set,
/// which requires a cache.
///
/// # Middleware
/// - CORS: the given policy
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let mut router = Router::new()
        .route("/api/items", get(list_items_handler))
        .route("/api/items/add", post(add_item_handler))
        .route("/api/items/update", put(update_item_handler))
        .route("/health", get(health_handler));

    if state.serve_lookup {
        router = router.route("/api/items/get", get(get_item_handler));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
