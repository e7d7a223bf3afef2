//! Bill and item records.
//!
//! A bill is whatever JSON object the client posted. The service reads
//! `user_id` when filtering and writes `total` when calculating; neither
//! is required to have any particular type on the way in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier for bills and items
pub type RecordId = u64;

/// A bill as stored and returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bill(Map<String, Value>);

impl Bill {
    pub fn new(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self(fields)
    }

    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.0
            .insert("user_id".to_string(), Value::String(user_id.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Whether this bill belongs to `user_id`
    ///
    /// Only string owners can match; the query string is always text.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.get("user_id").and_then(Value::as_str) == Some(user_id)
    }

    /// Total written by the calculator, if it is numeric
    pub fn total(&self) -> Option<f64> {
        self.get("total").and_then(Value::as_f64)
    }

    pub fn set_total(&mut self, total: f64) {
        self.0.insert("total".to_string(), Value::from(total));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Bill {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Item payload accepted by `POST /bills/:id/items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Line cost, already multiplied out for the quantity
    pub cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: Some(name.into()),
            cost,
            quantity: None,
            extra: Map::new(),
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// An item attached to a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: RecordId,

    #[serde(flatten)]
    pub data: NewItem,
}

impl Item {
    pub fn cost(&self) -> f64 {
        self.data.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_keeps_unknown_fields() {
        let bill: Bill = serde_json::from_str(
            r#"{"name": "Dinner", "user_id": "u1", "currency": "USD", "people": 3}"#,
        )
        .unwrap();

        assert_eq!(bill.name(), Some("Dinner"));
        assert!(bill.is_owned_by("u1"));
        assert_eq!(bill.get("currency"), Some(&Value::from("USD")));

        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["people"], 3);
        assert!(json.get("total").is_none());
    }

    #[test]
    fn test_bill_fields_are_untyped() {
        let bill: Bill =
            serde_json::from_str(r#"{"user_id": 7, "name": "Dinner", "total": "n/a"}"#).unwrap();

        assert!(!bill.is_owned_by("7"));
        assert_eq!(bill.total(), None);
        assert_eq!(serde_json::to_value(&bill).unwrap()["user_id"], 7);
    }

    #[test]
    fn test_set_total_overwrites() {
        let mut bill: Bill = serde_json::from_str(r#"{"total": "n/a"}"#).unwrap();
        bill.set_total(21.75);
        assert_eq!(bill.total(), Some(21.75));
    }

    #[test]
    fn test_item_flattens_payload() {
        let item = Item {
            item_id: 4,
            data: NewItem::new("Pizza", 18.5).quantity(2),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["item_id"], 4);
        assert_eq!(json["name"], "Pizza");
        assert_eq!(json["cost"], 18.5);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_item_requires_cost() {
        let result: Result<NewItem, _> = serde_json::from_str(r#"{"name": "Soda"}"#);
        assert!(result.is_err());
    }
}
