//! Error types for the items service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Backend Error ==
/// Failure reported by a cache backend itself.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Redis command or connection failure
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

// == Cache Error ==
/// Conditions raised while mirroring an item into the cache or reading it back.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The item could not be encoded
    #[error("unable to marshal the item: {0}")]
    Serialize(String),

    /// The backend rejected the write
    #[error("unable to cache the item: {0}")]
    Write(#[source] BackendError),

    /// The backend failed while reading the key
    #[error("unable to retrieve the cached item: {0}")]
    ReadBack(#[source] BackendError),

    /// No live entry under the key
    #[error("unable to retrieve the cached item: key {0} not found")]
    Miss(String),

    /// The cached bytes are not a valid item
    #[error("unable to unmarshal the cached item: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// The read-back copy differs from what was written
    #[error("the cached item under key {0} is different from the original item")]
    Mismatch(String),
}

// == Store Error ==
/// Failure reported by the item store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// == App Error ==
/// Error type surfaced by the service and mapped to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body is not a valid item payload
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// Update payload without a usable id
    #[error("Item ID is required")]
    MissingItemId,

    /// Lookup without an `id` query parameter
    #[error("ID is required")]
    MissingQueryId,

    /// Lookup with a non-integer id
    #[error("Invalid ID format")]
    InvalidIdFormat,

    /// Update matched no row
    #[error("No item found with the given ID")]
    NotFound,

    /// Lookup requested while no cache is configured
    #[error("Item cache is not configured")]
    CacheDisabled,

    #[error("Unable to execute the query: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_)
            | AppError::MissingItemId
            | AppError::MissingQueryId
            | AppError::InvalidIdFormat => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::CacheDisabled | AppError::Store(_) | AppError::Cache(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", message);
        }

        (status, message).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, AppError>;
