//! Engine configuration.
//!
//! The built-in bucket tables are the default. Deployments that need
//! different boundaries can externalize them to a TOML or JSON file.

use crate::buckets::{
    domain_authority_table, price_table, traffic_table, IntervalTable, RangeInterval, Theme,
    ValueDomain,
};
use crate::error::FilterError;
use crate::metric::MetricFamily;
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bucket tables for the numeric families.
///
/// A table omitted from a config file falls back to the built-in one. A
/// table given without a `domain` takes the built-in table's domain for its
/// family, so an externalized DA table still accepts 0 and caps at 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BucketConfigFile")]
pub struct BucketConfig {
    pub price: IntervalTable,
    pub domain_authority: IntervalTable,
    pub traffic: IntervalTable,
}

fn default_price_table() -> IntervalTable {
    price_table(Currency::default())
}

/// A bucket table as written in a config file.
#[derive(Debug, Deserialize)]
struct TableFile {
    name: String,
    #[serde(default)]
    domain: Option<ValueDomain>,
    intervals: Vec<RangeInterval>,
}

impl TableFile {
    fn into_table(self, builtin: IntervalTable) -> IntervalTable {
        IntervalTable::new(self.name, self.domain.unwrap_or(builtin.domain), self.intervals)
    }
}

#[derive(Debug, Deserialize)]
struct BucketConfigFile {
    #[serde(default)]
    price: Option<TableFile>,
    #[serde(default)]
    domain_authority: Option<TableFile>,
    #[serde(default)]
    traffic: Option<TableFile>,
}

impl From<BucketConfigFile> for BucketConfig {
    fn from(file: BucketConfigFile) -> Self {
        fn resolve(table: Option<TableFile>, builtin: IntervalTable) -> IntervalTable {
            match table {
                Some(table) => table.into_table(builtin),
                None => builtin,
            }
        }

        Self {
            price: resolve(file.price, default_price_table()),
            domain_authority: resolve(file.domain_authority, domain_authority_table()),
            traffic: resolve(file.traffic, traffic_table()),
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self::for_currency(Currency::default())
    }
}

impl BucketConfig {
    /// Built-in tables with price labels in `currency`.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            price: price_table(currency),
            domain_authority: domain_authority_table(),
            traffic: traffic_table(),
        }
    }

    /// Table for a numeric family; categorical families have none.
    pub fn table(&self, family: MetricFamily) -> Option<&IntervalTable> {
        match family {
            MetricFamily::Price => Some(&self.price),
            MetricFamily::DomainAuthority => Some(&self.domain_authority),
            MetricFamily::Traffic => Some(&self.traffic),
            MetricFamily::Country | MetricFamily::LinkType => None,
        }
    }

    /// Validate every table.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.price.validate()?;
        self.domain_authority.validate()?;
        self.traffic.validate()
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency used for price labels.
    #[serde(default)]
    pub currency: Currency,
    /// Theme for badge colors.
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub buckets: BucketConfig,
}

impl EngineConfig {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            theme: Theme::default(),
            buckets: BucketConfig::for_currency(currency),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Load and validate a config file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FilterError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FilterError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.finish()
    }

    pub fn from_json_str(content: &str) -> Result<Self, FilterError> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.finish()
    }

    // A price table left at its default is relabelled for the configured
    // currency before validation.
    fn finish(mut self) -> Result<Self, FilterError> {
        if self.buckets.price == default_price_table() {
            self.buckets.price = price_table(self.currency);
        }
        self.buckets.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_builtin_tables() {
        let config = EngineConfig::default();
        assert_eq!(config.currency, Currency::BRL);
        assert_eq!(config.buckets.price.len(), 7);
        assert_eq!(config.buckets.domain_authority.len(), 5);
        assert_eq!(config.buckets.traffic.len(), 6);
        assert!(config.buckets.validate().is_ok());
    }

    #[test]
    fn test_table_lookup_by_family() {
        let buckets = BucketConfig::default();
        assert_eq!(buckets.table(MetricFamily::Traffic).unwrap().name, "traffic");
        assert!(buckets.table(MetricFamily::Country).is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            currency = "USD"
            theme = "dark"

            [buckets.traffic]
            name = "traffic"
            domain = { min = 0.0, min_inclusive = false }

            [[buckets.traffic.intervals]]
            id = "small"
            label = "Small"
            min = 1.0
            max = 1000.0

            [[buckets.traffic.intervals]]
            id = "large"
            label = "Large"
            min = 1001.0
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.buckets.traffic.len(), 2);
        assert_eq!(config.buckets.traffic.intervals[1].max, None);
        assert_eq!(config.buckets.domain_authority.len(), 5);
        assert_eq!(config.buckets.price.intervals[6].label, "$5,000+");
    }

    #[test]
    fn test_table_without_domain_keeps_family_domain() {
        let config = EngineConfig::from_toml_str(
            r#"
            [buckets.domain_authority]
            name = "domain_authority"

            [[buckets.domain_authority.intervals]]
            id = "low"
            label = "Low"
            min = 0.0
            max = 49.0

            [[buckets.domain_authority.intervals]]
            id = "high"
            label = "High"
            min = 50.0
            max = 100.0
            "#,
        )
        .unwrap();

        let table = &config.buckets.domain_authority;
        assert_eq!(table.domain, ValueDomain::closed(0.0, 100.0));
        assert_eq!(table.classify(0.0).map(|id| id.as_str()), Some("low"));
        assert_eq!(table.classify(100.5), None);
        assert_eq!(config.buckets.traffic, traffic_table());
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{
                "buckets": {
                    "traffic": {
                        "name": "traffic",
                        "intervals": [
                            { "id": "a", "label": "a", "min": 1, "max": 100 },
                            { "id": "b", "label": "b", "min": 50, "max": 200 }
                        ]
                    }
                }
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, FilterError::InvalidTable { .. }));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("currency = [").unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, FilterError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load("/nonexistent/buckets.toml").unwrap_err();
        assert!(matches!(err, FilterError::ConfigIo { .. }));
    }
}
