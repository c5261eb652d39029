//! Range intervals, value domains and classification.

use crate::error::FilterError;
use crate::ids::IntervalId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A closed numeric bucket. `max: None` means unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeInterval {
    pub id: IntervalId,
    pub label: String,
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
}

impl RangeInterval {
    pub fn new(
        id: impl Into<IntervalId>,
        label: impl Into<String>,
        min: f64,
        max: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            min,
            max,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// The range of values a metric can validly take. Values outside it are
/// "no data" for that metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    /// Whether `min` itself is a valid value (DA 0 is, price 0 is not).
    pub min_inclusive: bool,
    #[serde(default)]
    pub max: Option<f64>,
}

impl ValueDomain {
    /// Strictly positive values: `(0, +inf)`.
    pub fn positive() -> Self {
        Self {
            min: 0.0,
            min_inclusive: false,
            max: None,
        }
    }

    /// A closed range `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            min_inclusive: true,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && self.max.map_or(true, |max| value <= max)
    }
}

/// An ordered table of disjoint buckets for one metric family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTable {
    pub name: String,
    pub domain: ValueDomain,
    pub intervals: Vec<RangeInterval>,
}

impl IntervalTable {
    pub fn new(
        name: impl Into<String>,
        domain: ValueDomain,
        intervals: Vec<RangeInterval>,
    ) -> Self {
        Self {
            name: name.into(),
            domain,
            intervals,
        }
    }

    /// Classify a value into a bucket id, or `None` when the value is
    /// outside the table's domain or falls in no bucket.
    pub fn classify(&self, value: f64) -> Option<&IntervalId> {
        if !self.domain.contains(value) {
            return None;
        }
        self.intervals
            .iter()
            .find(|interval| interval.contains(value))
            .map(|interval| &interval.id)
    }

    /// Look up a bucket by id.
    pub fn get(&self, id: &str) -> Option<&RangeInterval> {
        self.intervals.iter().find(|interval| interval.id.as_str() == id)
    }

    /// Whether the bucket with `id` contains `value`. Unknown ids match nothing.
    pub fn interval_contains(&self, id: &str, value: f64) -> bool {
        self.get(id).is_some_and(|interval| interval.contains(value))
    }

    pub fn ids(&self) -> impl Iterator<Item = &IntervalId> {
        self.intervals.iter().map(|interval| &interval.id)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Check the table invariants: non-empty, unique ids, `min <= max`,
    /// ascending and pairwise disjoint, with at most one unbounded bucket in
    /// last position.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.intervals.is_empty() {
            return Err(FilterError::invalid_table(&self.name, "table has no intervals"));
        }

        let mut seen = HashSet::new();
        for interval in &self.intervals {
            if !seen.insert(interval.id.as_str()) {
                return Err(FilterError::invalid_table(
                    &self.name,
                    format!("duplicate interval id '{}'", interval.id),
                ));
            }
            if !interval.min.is_finite() || interval.max.is_some_and(|max| !max.is_finite()) {
                return Err(FilterError::invalid_table(
                    &self.name,
                    format!("interval '{}' has a non-finite bound", interval.id),
                ));
            }
            if interval.max.is_some_and(|max| max < interval.min) {
                return Err(FilterError::invalid_table(
                    &self.name,
                    format!("interval '{}' has min above max", interval.id),
                ));
            }
        }

        for pair in self.intervals.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max {
                None => {
                    return Err(FilterError::invalid_table(
                        &self.name,
                        format!("unbounded interval '{}' is not last", lower.id),
                    ))
                }
                Some(max) if max >= upper.min => {
                    return Err(FilterError::invalid_table(
                        &self.name,
                        format!(
                            "intervals '{}' and '{}' overlap or are out of order",
                            lower.id, upper.id
                        ),
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Classify `value` against `table`. See [`IntervalTable::classify`].
pub fn classify(value: f64, table: &IntervalTable) -> Option<&IntervalId> {
    table.classify(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IntervalTable {
        IntervalTable::new(
            "sample",
            ValueDomain::positive(),
            vec![
                RangeInterval::new("low", "1 - 10", 1.0, Some(10.0)),
                RangeInterval::new("mid", "11 - 100", 11.0, Some(100.0)),
                RangeInterval::new("high", "100+", 101.0, None),
            ],
        )
    }

    #[test]
    fn test_interval_bounds_are_inclusive() {
        let interval = RangeInterval::new("x", "x", 11.0, Some(100.0));
        assert!(interval.contains(11.0));
        assert!(interval.contains(100.0));
        assert!(!interval.contains(10.99));
        assert!(!interval.contains(100.01));
    }

    #[test]
    fn test_open_ended_interval() {
        let interval = RangeInterval::new("x", "x", 101.0, None);
        assert!(interval.contains(1e12));
    }

    #[test]
    fn test_classify_first_match() {
        let table = table();
        assert_eq!(classify(5.0, &table).map(|id| id.as_str()), Some("low"));
        assert_eq!(classify(100.0, &table).map(|id| id.as_str()), Some("mid"));
        assert_eq!(classify(1e9, &table).map(|id| id.as_str()), Some("high"));
    }

    #[test]
    fn test_classify_outside_domain_is_none() {
        let table = table();
        assert_eq!(classify(0.0, &table), None);
        assert_eq!(classify(-5.0, &table), None);
        assert_eq!(classify(f64::NAN, &table), None);
    }

    #[test]
    fn test_closed_domain() {
        let domain = ValueDomain::closed(0.0, 100.0);
        assert!(domain.contains(0.0));
        assert!(domain.contains(100.0));
        assert!(!domain.contains(100.5));
        assert!(!domain.contains(-1.0));
    }

    #[test]
    fn test_validate_accepts_sorted_disjoint_table() {
        assert!(table().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut table = table();
        table.intervals[1].min = 10.0;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_validate_rejects_unbounded_not_last() {
        let mut table = table();
        table.intervals.swap(1, 2);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let mut table = table();
        table.intervals[2].id = IntervalId::new("low");
        assert!(table.validate().unwrap_err().to_string().contains("duplicate"));

        let empty = IntervalTable::new("empty", ValueDomain::positive(), vec![]);
        assert!(empty.validate().is_err());
    }
}
