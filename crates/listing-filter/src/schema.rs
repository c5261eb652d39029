//! Listing-collection schema types.
//!
//! Each listing collection ships a dynamic schema: a list of field
//! descriptors whose `type` tag tells the engine how to read the raw value
//! stored under the field id.

use crate::ids::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of field type tags understood by the engine.
///
/// Unrecognized tags deserialize to [`FieldTypeTag::Other`] so that a schema
/// with extra field kinds still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldTypeTag {
    /// JSON payload carrying `price` / `promotional_price`.
    Product,
    /// Moz Domain Authority score.
    MozDa,
    /// Generic Domain Authority score.
    DomainAuthority,
    /// Ahrefs organic traffic estimate.
    AhrefsTraffic,
    /// Similarweb visits estimate.
    SimilarwebTraffic,
    /// Google traffic estimate.
    GoogleTraffic,
    /// Country of the site.
    Country,
    /// Link type (dofollow, nofollow, sponsored...).
    LinkType,
    /// Free text.
    Text,
    /// Plain number.
    Number,
    /// URL.
    Url,
    /// Any tag the engine has no rule for.
    Other,
}

impl FieldTypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTypeTag::Product => "product",
            FieldTypeTag::MozDa => "moz_da",
            FieldTypeTag::DomainAuthority => "domain_authority",
            FieldTypeTag::AhrefsTraffic => "ahrefs_traffic",
            FieldTypeTag::SimilarwebTraffic => "similarweb_traffic",
            FieldTypeTag::GoogleTraffic => "google_traffic",
            FieldTypeTag::Country => "country",
            FieldTypeTag::LinkType => "link_type",
            FieldTypeTag::Text => "text",
            FieldTypeTag::Number => "number",
            FieldTypeTag::Url => "url",
            FieldTypeTag::Other => "other",
        }
    }

    /// Parse a tag, mapping unknown strings to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "product" => FieldTypeTag::Product,
            "moz_da" => FieldTypeTag::MozDa,
            "domain_authority" => FieldTypeTag::DomainAuthority,
            "ahrefs_traffic" => FieldTypeTag::AhrefsTraffic,
            "similarweb_traffic" => FieldTypeTag::SimilarwebTraffic,
            "google_traffic" => FieldTypeTag::GoogleTraffic,
            "country" => FieldTypeTag::Country,
            "link_type" | "link" => FieldTypeTag::LinkType,
            "text" => FieldTypeTag::Text,
            "number" => FieldTypeTag::Number,
            "url" => FieldTypeTag::Url,
            _ => FieldTypeTag::Other,
        }
    }
}

impl From<String> for FieldTypeTag {
    fn from(s: String) -> Self {
        FieldTypeTag::parse(&s)
    }
}

impl From<FieldTypeTag> for String {
    fn from(tag: FieldTypeTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for FieldTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one field of a listing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldTypeTag,
    #[serde(default)]
    pub label: String,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<FieldId>, field_type: FieldTypeTag, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
        }
    }
}
