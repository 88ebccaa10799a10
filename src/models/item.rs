//! The item entity.

use serde::{Deserialize, Serialize};

/// A persisted item. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// An item that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Attaches the id the store generated.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_shape() {
        let item = Item::new(1, "Apple", 0.5);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Apple", "price": 0.5}));
    }

    #[test]
    fn test_new_item_with_id() {
        let item = NewItem::new("Pear", 1.25).with_id(7);
        assert_eq!(item, Item::new(7, "Pear", 1.25));
    }
}
