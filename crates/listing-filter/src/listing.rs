//! Listing records as supplied by the data layer.

use crate::ids::{FieldId, ListingId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A listing: an opaque id plus raw values keyed by schema field id.
///
/// Values are whatever the data layer stored: numbers, locale-formatted
/// strings, nested JSON objects or `null`. The engine only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    #[serde(default)]
    pub fields: HashMap<FieldId, Value>,
}

impl ListingRecord {
    /// Create a listing with no field values.
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Set a raw field value.
    pub fn with_field(mut self, field: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Get the raw value stored under a field id.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_builder() {
        let listing = ListingRecord::new("l1")
            .with_field("da", 42)
            .with_field("country", "BR");

        assert_eq!(listing.get("da"), Some(&json!(42)));
        assert_eq!(listing.get("country"), Some(&json!("BR")));
        assert_eq!(listing.get("missing"), None);
    }

    #[test]
    fn test_listing_deserializes_heterogeneous_values() {
        let listing: ListingRecord = serde_json::from_value(json!({
            "id": "l2",
            "fields": {
                "price": { "price": "120,00", "promotional_price": null },
                "traffic": "12.500",
                "notes": null
            }
        }))
        .unwrap();

        assert_eq!(listing.id.as_str(), "l2");
        assert!(listing.get("price").unwrap().is_object());
        assert_eq!(listing.get("notes"), Some(&Value::Null));
    }
}
