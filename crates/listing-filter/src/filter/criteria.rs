//! Numeric filter criteria and predicate construction.

use super::range::CustomRange;
use crate::buckets::IntervalTable;
use crate::ids::IntervalId;
use crate::listing::ListingRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A boxed inclusion test over listings.
pub type ListingPredicate<'a> = Box<dyn Fn(&ListingRecord) -> bool + 'a>;

/// Selected buckets plus an optional custom range for one numeric family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub selected_interval_ids: BTreeSet<IntervalId>,
    #[serde(default)]
    pub custom_range: Option<CustomRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a predefined bucket.
    pub fn with_interval(mut self, id: impl Into<IntervalId>) -> Self {
        self.selected_interval_ids.insert(id.into());
        self
    }

    /// Set the custom range.
    pub fn with_custom_range(mut self, range: CustomRange) -> Self {
        self.custom_range = Some(range);
        self
    }

    /// Toggle a bucket on or off. Returns whether it is now selected.
    pub fn toggle(&mut self, id: impl Into<IntervalId>) -> bool {
        let id = id.into();
        if self.selected_interval_ids.remove(&id) {
            false
        } else {
            self.selected_interval_ids.insert(id);
            true
        }
    }

    /// Drop all selections and the custom range.
    pub fn clear(&mut self) {
        self.selected_interval_ids.clear();
        self.custom_range = None;
    }

    /// No buckets selected and no custom range.
    pub fn is_empty(&self) -> bool {
        self.selected_interval_ids.is_empty() && self.custom_range.is_none()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_interval_ids.contains(id)
    }

    /// Whether a metric value passes these criteria.
    ///
    /// Empty criteria pass everything, including no data. Otherwise no data
    /// (or a value outside the table's domain) fails, and a value passes if
    /// it lies in any selected bucket OR inside the custom range.
    pub fn matches(&self, table: &IntervalTable, value: Option<f64>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(value) = value.filter(|v| table.domain.contains(*v)) else {
            return false;
        };

        let in_selected = self
            .selected_interval_ids
            .iter()
            .any(|id| table.interval_contains(id.as_str(), value));

        in_selected || self.custom_range.is_some_and(|range| range.contains(value))
    }
}

/// Build the inclusion predicate for one numeric family.
///
/// `value_of` extracts the family's metric from a listing (`None` for no
/// data). Empty criteria yield a predicate that is always true.
pub fn build_predicate<'a, F>(
    criteria: &'a FilterCriteria,
    table: &'a IntervalTable,
    value_of: F,
) -> ListingPredicate<'a>
where
    F: Fn(&ListingRecord) -> Option<f64> + 'a,
{
    if criteria.is_empty() {
        return Box::new(|_: &ListingRecord| true);
    }
    Box::new(move |listing: &ListingRecord| criteria.matches(table, value_of(listing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buckets::{domain_authority_table, traffic_table};
    use crate::normalize::normalize_opt;

    fn da_of(listing: &ListingRecord) -> Option<f64> {
        normalize_opt(listing.get("da"))
    }

    fn listing(id: &str, da: Option<f64>) -> ListingRecord {
        let listing = ListingRecord::new(id);
        match da {
            Some(da) => listing.with_field("da", da),
            None => listing,
        }
    }

    #[test]
    fn test_empty_criteria_pass_everything() {
        let criteria = FilterCriteria::new();
        let table = domain_authority_table();
        let predicate = build_predicate(&criteria, &table, da_of);

        assert!(predicate(&listing("a", Some(55.0))));
        assert!(predicate(&listing("b", None)));
        assert!(predicate(&ListingRecord::new("c").with_field("da", "n/a")));
    }

    #[test]
    fn test_selected_bucket() {
        let criteria = FilterCriteria::new().with_interval("B");
        let table = domain_authority_table();
        let predicate = build_predicate(&criteria, &table, da_of);

        assert!(predicate(&listing("a", Some(60.0))));
        assert!(predicate(&listing("b", Some(79.0))));
        assert!(!predicate(&listing("c", Some(80.0))));
    }

    #[test]
    fn test_buckets_and_custom_range_are_or_combined() {
        let criteria = FilterCriteria::new()
            .with_interval("B")
            .with_custom_range(CustomRange::between(90.0, 100.0));
        let table = domain_authority_table();
        let predicate = build_predicate(&criteria, &table, da_of);

        assert!(predicate(&listing("in-range", Some(95.0))));
        assert!(predicate(&listing("in-bucket", Some(65.0))));
        assert!(!predicate(&listing("neither", Some(85.0))));
    }

    #[test]
    fn test_no_data_excluded_once_filtering() {
        let table = domain_authority_table();

        let by_bucket = FilterCriteria::new().with_interval("F");
        assert!(!build_predicate(&by_bucket, &table, da_of)(&listing("x", None)));

        let by_range = FilterCriteria::new().with_custom_range(CustomRange::default());
        let predicate = build_predicate(&by_range, &table, da_of);
        assert!(!predicate(&listing("x", None)));
        assert!(predicate(&listing("y", Some(0.0))));
    }

    #[test]
    fn test_values_outside_domain_are_no_data() {
        let table = traffic_table();
        let criteria = FilterCriteria::new().with_custom_range(CustomRange::at_most(100.0));
        let predicate = build_predicate(&criteria, &table, |l: &ListingRecord| {
            normalize_opt(l.get("traffic"))
        });

        assert!(!predicate(&ListingRecord::new("zero").with_field("traffic", 0)));
        assert!(predicate(&ListingRecord::new("some").with_field("traffic", 50)));
    }

    #[test]
    fn test_unknown_bucket_matches_nothing() {
        let criteria = FilterCriteria::new().with_interval("Z");
        assert!(!criteria.matches(&domain_authority_table(), Some(50.0)));
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.toggle("A"));
        assert!(criteria.is_selected("A"));
        assert!(!criteria.toggle("A"));
        assert!(criteria.is_empty());

        criteria = criteria.with_interval("C").with_custom_range(CustomRange::at_least(1.0));
        criteria.clear();
        assert!(criteria.is_empty());
    }
}
