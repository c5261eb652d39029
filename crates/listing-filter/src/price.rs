//! Effective price resolution.

use crate::listing::ListingRecord;
use crate::normalize::{normalize, normalize_opt};
use crate::schema::{FieldDescriptor, FieldTypeTag};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pricing payload stored under a `product` field.
///
/// Both sub-fields may be numbers or locale-formatted strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceRecord {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub promotional_price: Option<Value>,
}

impl ProductPriceRecord {
    /// Read a pricing payload that is either an object or a JSON-encoded
    /// string. Anything else, including malformed JSON, yields `None`.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        match raw {
            Value::Object(_) => serde_json::from_value(raw.clone()).ok(),
            Value::String(s) => serde_json::from_str(s).ok(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => None,
        }
    }

    /// The effective price: the promotional price when it is a positive
    /// number, otherwise the regular price, otherwise 0 (no data).
    pub fn effective_price(&self) -> f64 {
        let promotional = normalize_opt(self.promotional_price.as_ref()).filter(|p| *p > 0.0);
        promotional
            .or_else(|| normalize_opt(self.price.as_ref()))
            .unwrap_or(0.0)
    }
}

/// Resolve the effective monetary price of a listing.
///
/// Returns 0 when the field is absent or its payload cannot be read. Never
/// fails.
pub fn resolve_price(listing: &ListingRecord, field: &FieldDescriptor) -> f64 {
    let Some(raw) = listing.get(field.id.as_str()) else {
        return 0.0;
    };

    match field.field_type {
        FieldTypeTag::Product => ProductPriceRecord::from_raw(raw)
            .map(|record| record.effective_price())
            .unwrap_or(0.0),
        FieldTypeTag::MozDa
        | FieldTypeTag::DomainAuthority
        | FieldTypeTag::AhrefsTraffic
        | FieldTypeTag::SimilarwebTraffic
        | FieldTypeTag::GoogleTraffic
        | FieldTypeTag::Country
        | FieldTypeTag::LinkType
        | FieldTypeTag::Text
        | FieldTypeTag::Number
        | FieldTypeTag::Url
        | FieldTypeTag::Other => normalize(raw).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_field() -> FieldDescriptor {
        FieldDescriptor::new("product", FieldTypeTag::Product, "Produto")
    }

    fn priced(payload: Value) -> ListingRecord {
        ListingRecord::new("l1").with_field("product", payload)
    }

    #[test]
    fn test_promotional_price_wins_when_positive() {
        let listing = priced(json!({ "price": 100, "promotional_price": 50 }));
        assert_eq!(resolve_price(&listing, &product_field()), 50.0);
    }

    #[test]
    fn test_zero_promotional_price_falls_back() {
        let listing = priced(json!({ "price": 100, "promotional_price": 0 }));
        assert_eq!(resolve_price(&listing, &product_field()), 100.0);
    }

    #[test]
    fn test_unparseable_promotional_price_falls_back() {
        let listing = priced(json!({ "price": 100, "promotional_price": "abc" }));
        assert_eq!(resolve_price(&listing, &product_field()), 100.0);
    }

    #[test]
    fn test_negative_promotional_price_falls_back() {
        let listing = priced(json!({ "price": "1.200,00", "promotional_price": "-5" }));
        assert_eq!(resolve_price(&listing, &product_field()), 1200.0);
    }

    #[test]
    fn test_json_encoded_payload() {
        let listing = priced(json!(r#"{"price":"R$ 250,00","promotional_price":"199,90"}"#));
        assert_eq!(resolve_price(&listing, &product_field()), 199.9);
    }

    #[test]
    fn test_malformed_payload_is_zero() {
        let listing = priced(json!("{ price: 10"));
        assert_eq!(resolve_price(&listing, &product_field()), 0.0);

        let listing = priced(json!(42));
        assert_eq!(resolve_price(&listing, &product_field()), 0.0);
    }

    #[test]
    fn test_missing_prices_are_zero() {
        assert_eq!(resolve_price(&priced(json!({})), &product_field()), 0.0);
        assert_eq!(
            resolve_price(&ListingRecord::new("l2"), &product_field()),
            0.0
        );
    }

    #[test]
    fn test_non_product_field_is_normalized_directly() {
        let field = FieldDescriptor::new("valor", FieldTypeTag::Number, "Valor");
        let listing = ListingRecord::new("l1").with_field("valor", "R$ 1.500");
        assert_eq!(resolve_price(&listing, &field), 1500.0);
    }
}
