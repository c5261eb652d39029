//! Metric families and per-listing metric extraction.

use crate::listing::ListingRecord;
use crate::money::{Currency, Money};
use crate::normalize::normalize_opt;
use crate::price::resolve_price;
use crate::schema::{FieldDescriptor, FieldTypeTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of filterable listing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Price,
    DomainAuthority,
    Traffic,
    Country,
    LinkType,
}

impl MetricFamily {
    /// All families, in the order filters are presented.
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::Price,
        MetricFamily::DomainAuthority,
        MetricFamily::Traffic,
        MetricFamily::Country,
        MetricFamily::LinkType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricFamily::Price => "price",
            MetricFamily::DomainAuthority => "domain_authority",
            MetricFamily::Traffic => "traffic",
            MetricFamily::Country => "country",
            MetricFamily::LinkType => "link_type",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "price" => Some(MetricFamily::Price),
            "domain_authority" | "da" => Some(MetricFamily::DomainAuthority),
            "traffic" => Some(MetricFamily::Traffic),
            "country" => Some(MetricFamily::Country),
            "link_type" | "link" => Some(MetricFamily::LinkType),
            _ => None,
        }
    }

    /// Human label used for facet headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            MetricFamily::Price => "Price",
            MetricFamily::DomainAuthority => "Domain Authority",
            MetricFamily::Traffic => "Traffic",
            MetricFamily::Country => "Country",
            MetricFamily::LinkType => "Link Type",
        }
    }

    /// Field type tags that carry this family, in priority order.
    pub fn canonical_types(&self) -> &'static [FieldTypeTag] {
        match self {
            MetricFamily::Price => &[FieldTypeTag::Product],
            MetricFamily::DomainAuthority => &[FieldTypeTag::MozDa, FieldTypeTag::DomainAuthority],
            MetricFamily::Traffic => &[
                FieldTypeTag::AhrefsTraffic,
                FieldTypeTag::SimilarwebTraffic,
                FieldTypeTag::GoogleTraffic,
            ],
            MetricFamily::Country => &[FieldTypeTag::Country],
            MetricFamily::LinkType => &[FieldTypeTag::LinkType],
        }
    }

    /// Lowercase keywords matched against field labels and ids, most
    /// specific first.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            MetricFamily::Price => &["price", "pre\u{e7}o", "preco", "valor"],
            MetricFamily::DomainAuthority => &["domain authority", "moz da", "da"],
            MetricFamily::Traffic => &["traffic", "tr\u{e1}fego", "trafego", "visits"],
            MetricFamily::Country => &["country", "pa\u{ed}s", "pais"],
            MetricFamily::LinkType => &["link type", "tipo de link", "tipo_link", "link_type"],
        }
    }

    /// Whether the family is bucketed numerically (as opposed to by term).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            MetricFamily::Price | MetricFamily::DomainAuthority | MetricFamily::Traffic
        )
    }

    /// Snap a raw number to the family's granularity. Prices are rounded to
    /// cents to match the cent-granular price buckets; every other family is
    /// compared as read.
    pub fn quantize(&self, value: f64) -> f64 {
        match self {
            MetricFamily::Price => Money::from_decimal(value, Currency::default()).to_decimal(),
            MetricFamily::DomainAuthority
            | MetricFamily::Traffic
            | MetricFamily::Country
            | MetricFamily::LinkType => value,
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the numeric value of `family` for a listing, or `None` for no data.
///
/// The field's type tag decides how the raw value is read: product payloads
/// go through price resolution, every other tag is normalized directly. A
/// resolved price of zero is no data.
pub fn metric_value(
    listing: &ListingRecord,
    field: &FieldDescriptor,
    family: MetricFamily,
) -> Option<f64> {
    let raw = match field.field_type {
        FieldTypeTag::Product => Some(resolve_price(listing, field)).filter(|p| *p > 0.0),
        FieldTypeTag::MozDa
        | FieldTypeTag::DomainAuthority
        | FieldTypeTag::AhrefsTraffic
        | FieldTypeTag::SimilarwebTraffic
        | FieldTypeTag::GoogleTraffic
        | FieldTypeTag::Number
        | FieldTypeTag::Text
        | FieldTypeTag::Other => normalize_opt(listing.get(field.id.as_str())),
        FieldTypeTag::Country | FieldTypeTag::LinkType | FieldTypeTag::Url => None,
    };
    raw.map(|v| family.quantize(v))
}

/// Extract the categorical value of a listing (country, link type), trimmed
/// and lowercased, or `None` when absent or blank.
pub fn category_value(listing: &ListingRecord, field: &FieldDescriptor) -> Option<String> {
    use serde_json::Value;

    let term = match listing.get(field.id.as_str())? {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}
