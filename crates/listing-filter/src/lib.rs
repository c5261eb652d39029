//! Listing classification and filtering engine for marketplace storefronts.
//!
//! Listings arrive from the data layer as loosely typed records keyed by a
//! per-collection schema. This crate turns them into filterable metrics:
//!
//! - **Normalize**: locale-aware parsing of numbers and currency strings
//! - **Fields**: locating the schema field that carries each metric family
//! - **Price**: effective price with promotional-price precedence
//! - **Buckets**: fixed bucket tables and classification
//! - **Filter**: selected buckets OR custom range, AND across families
//! - **Counts**: per-bucket counts and facets for badges
//!
//! # Example
//!
//! ```rust
//! use listing_filter::prelude::*;
//! use serde_json::json;
//!
//! let schema = vec![
//!     FieldDescriptor::new("product", FieldTypeTag::Product, "Produto"),
//!     FieldDescriptor::new("da", FieldTypeTag::MozDa, "Moz DA"),
//! ];
//! let listings = vec![
//!     ListingRecord::new("a")
//!         .with_field("product", json!({ "price": "R$ 120,00", "promotional_price": "89,90" }))
//!         .with_field("da", 84),
//!     ListingRecord::new("b").with_field("da", "31"),
//! ];
//!
//! let engine = ListingEngine::new(schema);
//! let query = ListingQuery::new()
//!     .with_domain_authority(FilterCriteria::new().with_interval("A"));
//!
//! let outcome = engine.apply(&listings, &query);
//! assert_eq!(outcome.items.len(), 1);
//! assert_eq!(engine.classify(&listings[0], MetricFamily::Price), Some("price_50_100"));
//! ```

pub mod error;
pub mod ids;
pub mod log;
pub mod money;

pub mod buckets;
pub mod config;
pub mod counts;
pub mod engine;
pub mod facet;
pub mod fields;
pub mod filter;
pub mod listing;
pub mod metric;
pub mod normalize;
pub mod price;
pub mod schema;

pub use engine::{EngineBuilder, FilterOutcome, ListingEngine};
pub use error::{FilterError, RangeError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{FilterError, RangeError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Schema and records
    pub use crate::listing::ListingRecord;
    pub use crate::schema::{FieldDescriptor, FieldTypeTag};

    // Extraction
    pub use crate::fields::{detect, DetectedFields};
    pub use crate::metric::{category_value, metric_value, MetricFamily};
    pub use crate::normalize::{normalize, parse_locale_number};
    pub use crate::price::{resolve_price, ProductPriceRecord};

    // Buckets
    pub use crate::buckets::{classify, IntervalTable, RangeInterval, Theme, ValueDomain};

    // Filtering
    pub use crate::filter::{
        build_category_predicate, build_predicate, CategoryCriteria, CustomRange, FilterCriteria,
        ListingPredicate, ListingQuery, RangeValidation,
    };

    // Counts
    pub use crate::counts::{count_by_category, count_by_interval, CacheKey, CountCache};
    pub use crate::facet::{Facet, FacetType, FacetValue};

    // Engine
    pub use crate::config::{BucketConfig, EngineConfig};
    pub use crate::engine::{FilterOutcome, ListingEngine};
    pub use crate::log::{FilterLog, LogLevel, NoopLog};
}
