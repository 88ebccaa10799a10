//! Request DTOs for the items API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Item, NewItem};

/// Request body for POST /api/items/add
///
/// An `id` must still decode as an integer, but its value is ignored; the
/// store assigns one.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
}

impl CreateItemRequest {
    /// Decodes a request body, mapping every failure to a client error.
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        NewItem::new(req.name, req.price)
    }
}

/// Request body for PUT /api/items/update
///
/// # Fields
/// - `id`: Target item; absent decodes as 0, which `validate` rejects
/// - `name`: Replacement name
/// - `price`: Replacement price
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl UpdateItemRequest {
    /// Decodes a request body, mapping every failure to a client error.
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }

    /// Validates the request data
    ///
    /// Returns the item to write if the id is usable.
    pub fn validate(self) -> Result<Item, AppError> {
        if self.id == 0 {
            return Err(AppError::MissingItemId);
        }
        Ok(Item::new(self.id, self.name, self.price))
    }
}

/// Query string for GET /api/items/get
///
/// Only the first `id` pair counts; later repeats are ignored.
#[derive(Debug, Clone, Default)]
pub struct GetItemQuery {
    pub id: Option<String>,
}

impl GetItemQuery {
    /// Builds the query from decoded `key=value` pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find(|(name, _)| name == "id")
            .map(|(_, value)| value);
        Self { id }
    }

    /// Returns the id text once it parses as an integer.
    ///
    /// The text is returned unchanged since it is also the cache key, so
    /// `01` is accepted here but names a different entry than `1`.
    pub fn key(&self) -> Result<&str, AppError> {
        let raw = self
            .id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(AppError::MissingQueryId)?;

        raw.parse::<i64>().map_err(|_| AppError::InvalidIdFormat)?;
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let req = CreateItemRequest::from_slice(br#"{"name": "Apple", "price": 0.5}"#).unwrap();
        assert_eq!(req.name, "Apple");
        assert_eq!(req.price, 0.5);
    }

    #[test]
    fn test_create_request_ignores_id() {
        let req = CreateItemRequest::from_slice(br#"{"id": 42, "name": "Apple", "price": 1}"#)
            .unwrap();
        assert_eq!(NewItem::from(req), NewItem::new("Apple", 1.0));
    }

    #[test]
    fn test_create_request_missing_price() {
        let result = CreateItemRequest::from_slice(br#"{"name": "Apple"}"#);
        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
    }

    #[test]
    fn test_create_request_malformed_json() {
        let result = CreateItemRequest::from_slice(b"{not json");
        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
    }

    #[test]
    fn test_update_request_missing_id() {
        let req = UpdateItemRequest::from_slice(br#"{"name": "Apple", "price": 0.6}"#).unwrap();
        assert_eq!(req.id, 0);
        assert!(matches!(req.validate(), Err(AppError::MissingItemId)));
    }

    #[test]
    fn test_update_request_valid() {
        let req =
            UpdateItemRequest::from_slice(br#"{"id": 1, "name": "Apple", "price": 0.6}"#).unwrap();
        assert_eq!(req.validate().unwrap(), Item::new(1, "Apple", 0.6));
    }

    #[test]
    fn test_create_request_rejects_non_integer_id() {
        let result =
            CreateItemRequest::from_slice(br#"{"id": "abc", "name": "Apple", "price": 1}"#);
        assert!(matches!(result, Err(AppError::InvalidPayload(_))));

        let result =
            CreateItemRequest::from_slice(br#"{"id": 1.5, "name": "Apple", "price": 1}"#);
        assert!(matches!(result, Err(AppError::InvalidPayload(_))));
    }

    #[test]
    fn test_create_request_null_id() {
        let req = CreateItemRequest::from_slice(br#"{"id": null, "name": "Apple", "price": 1}"#)
            .unwrap();
        assert!(req.id.is_none());
    }

    #[test]
    fn test_get_query_key() {
        let query = GetItemQuery {
            id: Some("12".to_string()),
        };
        assert_eq!(query.key().unwrap(), "12");
    }

    #[test]
    fn test_get_query_key_keeps_raw_text() {
        for raw in ["01", "+1", "-3"] {
            let query = GetItemQuery {
                id: Some(raw.to_string()),
            };
            assert_eq!(query.key().unwrap(), raw);
        }
    }

    #[test]
    fn test_get_query_missing_or_empty() {
        assert!(matches!(
            GetItemQuery::default().key(),
            Err(AppError::MissingQueryId)
        ));
        let empty = GetItemQuery {
            id: Some(String::new()),
        };
        assert!(matches!(empty.key(), Err(AppError::MissingQueryId)));
    }

    #[test]
    fn test_get_query_invalid_format() {
        for raw in ["abc", " 1", "1.0", "99999999999999999999"] {
            let query = GetItemQuery {
                id: Some(raw.to_string()),
            };
            assert!(matches!(query.key(), Err(AppError::InvalidIdFormat)), "id: {}", raw);
        }
    }

    #[test]
    fn test_get_query_first_id_wins() {
        let query = GetItemQuery::from_pairs(vec![
            ("other".to_string(), "x".to_string()),
            ("id".to_string(), "1".to_string()),
            ("id".to_string(), "2".to_string()),
        ]);
        assert_eq!(query.key().unwrap(), "1");
    }

    #[test]
    fn test_get_query_from_pairs_without_id() {
        let query = GetItemQuery::from_pairs(vec![("name".to_string(), "1".to_string())]);
        assert!(matches!(query.key(), Err(AppError::MissingQueryId)));
    }
}
