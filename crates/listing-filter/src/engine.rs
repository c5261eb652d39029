//! Engine facade binding a schema, configuration and logging port.
//!
//! The facade is the only place that logs. Everything it calls is pure.

use crate::buckets::IntervalTable;
use crate::config::EngineConfig;
use crate::counts::{
    count_by_category, count_by_interval, CacheKey, CountCache, IntervalCounts, TermCounts,
};
use crate::facet::Facet;
use crate::fields::DetectedFields;
use crate::filter::{CustomRange, ListingPredicate, ListingQuery, RangeValidation};
use crate::listing::ListingRecord;
use crate::log::{FilterLog, LogLevel, NoopLog};
use crate::metric::{metric_value, MetricFamily};
use crate::schema::FieldDescriptor;
use serde_json::Value;
use std::sync::Arc;

/// Result of applying a query to a listing collection.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    /// Matching listings, in input order.
    pub items: Vec<&'a ListingRecord>,
    /// Size of the input collection.
    pub total: usize,
    /// Facets computed over the whole input collection.
    pub facets: Vec<Facet>,
}

impl<'a> FilterOutcome<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Listings hidden by the query.
    pub fn hidden(&self) -> usize {
        self.total - self.items.len()
    }
}

/// Builder for [`ListingEngine`].
pub struct EngineBuilder {
    schema: Vec<FieldDescriptor>,
    config: EngineConfig,
    log: Arc<dyn FilterLog>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log(mut self, log: Arc<dyn FilterLog>) -> Self {
        self.log = log;
        self
    }

    /// Detect fields for every family and build the engine.
    pub fn build(self) -> ListingEngine {
        let fields = DetectedFields::detect_all(&self.schema);

        if self.log.enabled(LogLevel::Debug) {
            for family in MetricFamily::ALL {
                match fields.get(family) {
                    Some(field) => self.log.debug(
                        "field detected",
                        &[
                            ("family", Value::from(family.as_str())),
                            ("field_id", Value::from(field.id.as_str())),
                            ("field_type", Value::from(field.field_type.as_str())),
                        ],
                    ),
                    None => self.log.debug(
                        "family not applicable",
                        &[("family", Value::from(family.as_str()))],
                    ),
                }
            }
        }

        ListingEngine {
            schema: self.schema,
            fields,
            config: self.config,
            log: self.log,
        }
    }
}

/// Classification and filtering over one listing-collection schema.
pub struct ListingEngine {
    schema: Vec<FieldDescriptor>,
    fields: DetectedFields,
    config: EngineConfig,
    log: Arc<dyn FilterLog>,
}

impl ListingEngine {
    /// Engine with default configuration and no logging.
    pub fn new(schema: Vec<FieldDescriptor>) -> Self {
        Self::builder(schema).build()
    }

    pub fn builder(schema: Vec<FieldDescriptor>) -> EngineBuilder {
        EngineBuilder {
            schema,
            config: EngineConfig::default(),
            log: Arc::new(NoopLog),
        }
    }

    pub fn schema(&self) -> &[FieldDescriptor] {
        &self.schema
    }

    pub fn fields(&self) -> &DetectedFields {
        &self.fields
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The field carrying `family`, or `None` when the family is not
    /// applicable to this schema.
    pub fn field(&self, family: MetricFamily) -> Option<&FieldDescriptor> {
        self.fields.get(family)
    }

    pub fn table(&self, family: MetricFamily) -> Option<&IntervalTable> {
        self.config.buckets.table(family)
    }

    /// Families with a detected field.
    pub fn applicable_families(&self) -> Vec<MetricFamily> {
        self.fields.applicable()
    }

    /// The numeric metric of a listing, or `None` for no data.
    pub fn value_of(&self, listing: &ListingRecord, family: MetricFamily) -> Option<f64> {
        metric_value(listing, self.field(family)?, family)
    }

    /// The bucket a listing falls in for a numeric family.
    pub fn classify(&self, listing: &ListingRecord, family: MetricFamily) -> Option<&str> {
        let value = self.value_of(listing, family)?;
        self.table(family)?.classify(value).map(|id| id.as_str())
    }

    /// Bucket counts for a numeric family; `None` when the family is
    /// categorical or not applicable.
    pub fn count(
        &self,
        listings: &[ListingRecord],
        family: MetricFamily,
    ) -> Option<IntervalCounts> {
        let field = self.field(family)?;
        let table = self.table(family)?;
        Some(count_by_interval(listings, field, table, family))
    }

    /// Term counts for a categorical family; `None` when numeric or not
    /// applicable.
    pub fn count_terms(
        &self,
        listings: &[ListingRecord],
        family: MetricFamily,
    ) -> Option<TermCounts> {
        if family.is_numeric() {
            return None;
        }
        Some(count_by_category(listings, self.field(family)?))
    }

    /// Bucket counts through a cache keyed by collection and schema revision.
    pub fn count_cached<'c>(
        &self,
        cache: &'c mut CountCache,
        key: CacheKey,
        listings: &[ListingRecord],
        family: MetricFamily,
    ) -> Option<&'c IntervalCounts> {
        let field = self.field(family)?;
        let table = self.table(family)?;
        Some(cache.intervals_or_compute(key, family, || {
            count_by_interval(listings, field, table, family)
        }))
    }

    /// Facets for every applicable family, in presentation order.
    pub fn facets(&self, listings: &[ListingRecord], query: &ListingQuery) -> Vec<Facet> {
        let mut facets = Vec::new();
        for family in self.applicable_families() {
            let Some(field) = self.field(family) else {
                continue;
            };
            let field_id = field.id.as_str();

            if let (Some(table), Some(criteria)) = (self.table(family), query.numeric(family)) {
                let counts = count_by_interval(listings, field, table, family);
                facets.push(Facet::range(
                    family,
                    field_id,
                    table,
                    &counts,
                    criteria,
                    self.config.theme,
                ));
            } else if let Some(criteria) = query.categorical(family) {
                let counts = count_by_category(listings, field);
                facets.push(Facet::terms(family, field_id, &counts, criteria));
            }
        }
        facets
    }

    /// Combined predicate for `query`.
    pub fn predicate<'a>(&'a self, query: &'a ListingQuery) -> ListingPredicate<'a> {
        query.predicate(&self.fields, &self.config.buckets)
    }

    /// Filter `listings` and compute facets.
    pub fn apply<'l>(
        &self,
        listings: &'l [ListingRecord],
        query: &ListingQuery,
    ) -> FilterOutcome<'l> {
        for family in MetricFamily::ALL {
            if query.is_active(family) && self.field(family).is_none() {
                self.log.debug(
                    "ignoring criteria for inapplicable family",
                    &[("family", Value::from(family.as_str()))],
                );
            }
        }

        let predicate = self.predicate(query);
        let items: Vec<&ListingRecord> = listings
            .iter()
            .filter(|&listing| predicate(listing))
            .collect();
        let facets = self.facets(listings, query);

        self.log.info(
            "filter applied",
            &[
                ("input", Value::from(listings.len())),
                ("matched", Value::from(items.len())),
                ("active_families", Value::from(self.active_family_names(query))),
            ],
        );

        FilterOutcome {
            total: listings.len(),
            items,
            facets,
        }
    }

    /// Validate a custom range, reporting rejections to the log.
    pub fn validate_range(&self, family: MetricFamily, range: &CustomRange) -> RangeValidation {
        let validation = range.validation();
        if let Some(error) = &validation.error {
            self.log.warn(
                "custom range rejected",
                &[
                    ("family", Value::from(family.as_str())),
                    ("error", Value::from(error.as_str())),
                ],
            );
        }
        validation
    }

    fn active_family_names(&self, query: &ListingQuery) -> Vec<&'static str> {
        MetricFamily::ALL
            .into_iter()
            .filter(|family| query.is_active(*family) && self.field(*family).is_some())
            .map(|family| family.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CategoryCriteria, FilterCriteria};
    use crate::log::LogFields;
    use crate::schema::FieldTypeTag;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        events: Mutex<Vec<(LogLevel, String)>>,
    }

    impl FilterLog for RecordingLog {
        fn log(&self, level: LogLevel, message: &str, _fields: LogFields<'_>) {
            self.events.lock().unwrap().push((level, message.to_string()));
        }
    }

    fn schema() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("url", FieldTypeTag::Url, "Site"),
            FieldDescriptor::new("product", FieldTypeTag::Product, "Produto"),
            FieldDescriptor::new("moz", FieldTypeTag::MozDa, "Moz DA"),
            FieldDescriptor::new("visits", FieldTypeTag::SimilarwebTraffic, "Visits"),
            FieldDescriptor::new("pais", FieldTypeTag::Text, "País"),
        ]
    }

    fn listings() -> Vec<ListingRecord> {
        vec![
            ListingRecord::new("1")
                .with_field("product", json!({ "price": "R$ 45,00" }))
                .with_field("moz", 82)
                .with_field("visits", "120.000")
                .with_field("pais", "BR"),
            ListingRecord::new("2")
                .with_field("product", json!({ "price": 300, "promotional_price": 180 }))
                .with_field("moz", "35")
                .with_field("visits", 900)
                .with_field("pais", "PT"),
            ListingRecord::new("3")
                .with_field("product", json!(r#"{"price":"7.500,00"}"#))
                .with_field("moz", 95)
                .with_field("pais", "br"),
            ListingRecord::new("4"),
        ]
    }

    #[test]
    fn test_detects_fields() {
        let engine = ListingEngine::new(schema());
        assert_eq!(engine.field(MetricFamily::Country).unwrap().id.as_str(), "pais");
        assert!(engine.field(MetricFamily::LinkType).is_none());
        assert_eq!(engine.applicable_families().len(), 4);
    }

    #[test]
    fn test_classify_listing() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        assert_eq!(engine.classify(&listings[0], MetricFamily::DomainAuthority), Some("A"));
        assert_eq!(engine.classify(&listings[1], MetricFamily::Price), Some("price_100_200"));
        assert_eq!(engine.classify(&listings[0], MetricFamily::Traffic), Some("traffic_100k_plus"));
        assert_eq!(engine.classify(&listings[3], MetricFamily::Price), None);
        assert_eq!(engine.classify(&listings[0], MetricFamily::Country), None);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        let outcome = engine.apply(&listings, &ListingQuery::new());
        assert_eq!(outcome.len(), 4);
        assert_eq!(outcome.hidden(), 0);
    }

    #[test]
    fn test_apply_filters_and_keeps_order() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        let query = ListingQuery::new()
            .with_domain_authority(
                FilterCriteria::new()
                    .with_interval("D")
                    .with_custom_range(CustomRange::between(90.0, 100.0)),
            )
            .with_country(CategoryCriteria::new().with_term("BR"));

        let outcome = engine.apply(&listings, &query);
        let ids: Vec<&str> = outcome.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
        assert_eq!(outcome.total, 4);
    }

    #[test]
    fn test_facets_cover_applicable_families() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        let query =
            ListingQuery::new().with_price(FilterCriteria::new().with_interval("price_1_50"));
        let outcome = engine.apply(&listings, &query);

        let families: Vec<MetricFamily> = outcome.facets.iter().map(|f| f.family).collect();
        assert_eq!(
            families,
            vec![
                MetricFamily::Price,
                MetricFamily::DomainAuthority,
                MetricFamily::Traffic,
                MetricFamily::Country
            ]
        );

        let price = &outcome.facets[0];
        assert_eq!(price.total(), 3);
        assert!(price.values[0].selected);

        let country = &outcome.facets[3];
        assert_eq!(country.values[0].value, "br");
        assert_eq!(country.values[0].count, 2);
    }

    #[test]
    fn test_count_cached() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        let mut cache = CountCache::new();
        let key = CacheKey::new(1, 1);

        let counts = engine
            .count_cached(&mut cache, key, &listings, MetricFamily::DomainAuthority)
            .unwrap()
            .clone();
        assert_eq!(counts["A"], 2);
        assert_eq!(counts["D"], 1);

        assert!(engine
            .count_cached(&mut cache, key, &listings, MetricFamily::Country)
            .is_none());
    }

    #[test]
    fn test_count_terms_only_for_categorical() {
        let engine = ListingEngine::new(schema());
        let listings = listings();
        assert!(engine.count_terms(&listings, MetricFamily::Price).is_none());
        assert_eq!(engine.count_terms(&listings, MetricFamily::Country).unwrap()["br"], 2);
        assert!(engine.count(&listings, MetricFamily::Country).is_none());
    }

    #[test]
    fn test_logging_goes_through_port() {
        let log = Arc::new(RecordingLog::default());
        let engine = ListingEngine::builder(schema()).log(log.clone()).build();
        let listings = listings();

        engine.apply(&listings, &ListingQuery::new());
        let validation =
            engine.validate_range(MetricFamily::Price, &CustomRange::between(10.0, 1.0));
        assert!(!validation.is_valid);

        let events = log.events.lock().unwrap();
        assert!(events.iter().any(|(l, m)| *l == LogLevel::Debug && m == "field detected"));
        assert!(events.iter().any(|(l, m)| *l == LogLevel::Info && m == "filter applied"));
        assert!(events.iter().any(|(l, m)| *l == LogLevel::Warn && m == "custom range rejected"));
    }
}
