//! Per-bucket listing counts for badges.

use crate::buckets::IntervalTable;
use crate::ids::IntervalId;
use crate::listing::ListingRecord;
use crate::metric::{category_value, metric_value, MetricFamily};
use crate::schema::FieldDescriptor;
use std::collections::{BTreeMap, HashMap};

/// Bucket id -> number of listings classified into it.
pub type IntervalCounts = BTreeMap<IntervalId, usize>;

/// Term -> number of listings carrying it.
pub type TermCounts = BTreeMap<String, usize>;

/// Count listings per bucket of `table`.
///
/// Every bucket starts at zero. Listings with no data, or whose value falls
/// outside the table, count toward nothing, so the sum of all counts never
/// exceeds the number of classifiable listings.
pub fn count_by_interval(
    listings: &[ListingRecord],
    field: &FieldDescriptor,
    table: &IntervalTable,
    family: MetricFamily,
) -> IntervalCounts {
    let mut counts: IntervalCounts = table.ids().map(|id| (id.clone(), 0)).collect();

    for listing in listings {
        let Some(value) = metric_value(listing, field, family) else {
            continue;
        };
        if let Some(id) = table.classify(value) {
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
    }

    counts
}

/// Count listings per distinct term (trimmed, lowercased).
pub fn count_by_category(listings: &[ListingRecord], field: &FieldDescriptor) -> TermCounts {
    let mut counts = TermCounts::new();
    for term in listings.iter().filter_map(|l| category_value(l, field)) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Identifies the inputs counts were derived from.
///
/// Callers bump a revision whenever the listing collection or the schema
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CacheKey {
    pub listings_revision: u64,
    pub schema_revision: u64,
}

impl CacheKey {
    pub fn new(listings_revision: u64, schema_revision: u64) -> Self {
        Self {
            listings_revision,
            schema_revision,
        }
    }
}

/// Memoized bucket counts, dropped whenever the cache key changes.
#[derive(Debug, Default)]
pub struct CountCache {
    key: Option<CacheKey>,
    intervals: HashMap<MetricFamily, IntervalCounts>,
    terms: HashMap<MetricFamily, TermCounts>,
}

impl CountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bucket counts for `family`, computing them on a miss.
    pub fn intervals_or_compute(
        &mut self,
        key: CacheKey,
        family: MetricFamily,
        compute: impl FnOnce() -> IntervalCounts,
    ) -> &IntervalCounts {
        self.roll(key);
        self.intervals.entry(family).or_insert_with(compute)
    }

    /// Cached term counts for `family`, computing them on a miss.
    pub fn terms_or_compute(
        &mut self,
        key: CacheKey,
        family: MetricFamily,
        compute: impl FnOnce() -> TermCounts,
    ) -> &TermCounts {
        self.roll(key);
        self.terms.entry(family).or_insert_with(compute)
    }

    /// Drop everything.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.intervals.clear();
        self.terms.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty() && self.terms.is_empty()
    }

    fn roll(&mut self, key: CacheKey) {
        if self.key != Some(key) {
            self.invalidate();
            self.key = Some(key);
        }
    }
}
