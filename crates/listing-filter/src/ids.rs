//! Newtype IDs for type-safe identifiers.
//!
//! Listing ids, schema field ids and bucket ids are all plain strings on the
//! wire; the newtypes keep them from being mixed up in engine signatures.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a marketplace listing.
    ListingId
);
define_id!(
    /// Identifier of a field in a listing-collection schema.
    FieldId
);
define_id!(
    /// Identifier of a predefined bucket in a range table.
    IntervalId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_creation() {
        let id = ListingId::new("listing-123");
        assert_eq!(id.as_str(), "listing-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: FieldId = "price".into();
        assert_eq!(id.as_str(), "price");
    }

    #[test]
    fn test_id_display() {
        let id = IntervalId::new("da_a");
        assert_eq!(format!("{}", id), "da_a");
    }

    #[test]
    fn test_id_borrows_as_str_for_lookup() {
        let mut map = HashMap::new();
        map.insert(FieldId::new("traffic"), 10);
        assert_eq!(map.get("traffic"), Some(&10));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = IntervalId::new("price_1_50");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"price_1_50\"");
    }
}
