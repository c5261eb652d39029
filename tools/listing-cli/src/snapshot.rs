//! Listing snapshot files.
//!
//! A snapshot is the schema and listings of one collection as exported by
//! the data layer:
//!
//! ```json
//! { "collection": "guest-posts", "schema": [...], "listings": [...] }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use listing_filter::listing::ListingRecord;
use listing_filter::schema::FieldDescriptor;
use serde::{Deserialize, Serialize};

/// Schema plus listings of one collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Collection name, attached to log entries.
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub schema: Vec<FieldDescriptor>,
    #[serde(default)]
    pub listings: Vec<ListingRecord>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_filter::schema::FieldTypeTag;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = Snapshot::from_json_str(
            r#"{
                "collection": "guest-posts",
                "schema": [
                    { "id": "product", "type": "product", "label": "Produto" },
                    { "id": "da", "type": "moz_da" }
                ],
                "listings": [
                    { "id": "1", "fields": { "product": { "price": "R$ 90,00" }, "da": 41 } },
                    { "id": "2" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.collection.as_deref(), Some("guest-posts"));
        assert_eq!(snapshot.schema[1].field_type, FieldTypeTag::MozDa);
        assert_eq!(snapshot.schema[1].label, "");
        assert_eq!(snapshot.listings.len(), 2);
        assert!(snapshot.listings[1].fields.is_empty());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Snapshot::load(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/snapshot.json"));
    }
}
