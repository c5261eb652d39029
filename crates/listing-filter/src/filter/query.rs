//! Multi-family listing query.

use super::category::{build_category_predicate, CategoryCriteria};
use super::criteria::{build_predicate, FilterCriteria, ListingPredicate};
use crate::config::BucketConfig;
use crate::fields::DetectedFields;
use crate::listing::ListingRecord;
use crate::metric::{metric_value, MetricFamily};
use serde::{Deserialize, Serialize};

/// Filter state across every family. Families combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub price: FilterCriteria,
    #[serde(default)]
    pub domain_authority: FilterCriteria,
    #[serde(default)]
    pub traffic: FilterCriteria,
    #[serde(default)]
    pub country: CategoryCriteria,
    #[serde(default)]
    pub link_type: CategoryCriteria,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, criteria: FilterCriteria) -> Self {
        self.price = criteria;
        self
    }

    pub fn with_domain_authority(mut self, criteria: FilterCriteria) -> Self {
        self.domain_authority = criteria;
        self
    }

    pub fn with_traffic(mut self, criteria: FilterCriteria) -> Self {
        self.traffic = criteria;
        self
    }

    pub fn with_country(mut self, criteria: CategoryCriteria) -> Self {
        self.country = criteria;
        self
    }

    pub fn with_link_type(mut self, criteria: CategoryCriteria) -> Self {
        self.link_type = criteria;
        self
    }

    /// Numeric criteria for a family; `None` for categorical families.
    pub fn numeric(&self, family: MetricFamily) -> Option<&FilterCriteria> {
        match family {
            MetricFamily::Price => Some(&self.price),
            MetricFamily::DomainAuthority => Some(&self.domain_authority),
            MetricFamily::Traffic => Some(&self.traffic),
            MetricFamily::Country | MetricFamily::LinkType => None,
        }
    }

    /// Term criteria for a family; `None` for numeric families.
    pub fn categorical(&self, family: MetricFamily) -> Option<&CategoryCriteria> {
        match family {
            MetricFamily::Country => Some(&self.country),
            MetricFamily::LinkType => Some(&self.link_type),
            MetricFamily::Price | MetricFamily::DomainAuthority | MetricFamily::Traffic => None,
        }
    }

    /// Whether the family has any active criteria.
    pub fn is_active(&self, family: MetricFamily) -> bool {
        match family {
            MetricFamily::Price | MetricFamily::DomainAuthority | MetricFamily::Traffic => {
                self.numeric(family).is_some_and(|c| !c.is_empty())
            }
            MetricFamily::Country | MetricFamily::LinkType => {
                self.categorical(family).is_some_and(|c| !c.is_empty())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        MetricFamily::ALL.iter().all(|family| !self.is_active(*family))
    }

    /// Build the combined predicate.
    ///
    /// A family whose field was not detected is skipped, whatever its
    /// criteria say.
    pub fn predicate<'a>(
        &'a self,
        fields: &'a DetectedFields,
        buckets: &'a BucketConfig,
    ) -> ListingPredicate<'a> {
        let mut parts: Vec<ListingPredicate<'a>> = Vec::new();

        for family in MetricFamily::ALL {
            if !self.is_active(family) {
                continue;
            }
            let Some(field) = fields.get(family) else {
                continue;
            };

            if let (Some(criteria), Some(table)) = (self.numeric(family), buckets.table(family)) {
                parts.push(build_predicate(criteria, table, move |listing: &ListingRecord| {
                    metric_value(listing, field, family)
                }));
            } else if let Some(criteria) = self.categorical(family) {
                parts.push(build_category_predicate(criteria, field));
            }
        }

        if parts.is_empty() {
            return Box::new(|_: &ListingRecord| true);
        }
        Box::new(move |listing: &ListingRecord| parts.iter().all(|part| part(listing)))
    }
}
