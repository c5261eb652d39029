//! Facets: counted filter options ready for a sidebar.

use crate::buckets::{display_intervals, IntervalTable, Theme};
use crate::counts::{IntervalCounts, TermCounts};
use crate::filter::{CategoryCriteria, FilterCriteria};
use crate::metric::MetricFamily;
use serde::{Deserialize, Serialize};

/// Type of facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetType {
    /// Discrete values (e.g., countries, link types).
    Terms,
    /// Numeric buckets (e.g., price, DA, traffic).
    Range,
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// Bucket id or term.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Number of listings with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
    /// Badge color for graded buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Price").
    pub name: String,
    /// Schema field this facet filters on.
    pub field: String,
    pub family: MetricFamily,
    pub facet_type: FacetType,
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Range facet in table order.
    pub fn range(
        family: MetricFamily,
        field: impl Into<String>,
        table: &IntervalTable,
        counts: &IntervalCounts,
        criteria: &FilterCriteria,
        theme: Theme,
    ) -> Self {
        let values = display_intervals(table, family, theme)
            .into_iter()
            .map(|display| FacetValue {
                count: counts.get(&display.id).copied().unwrap_or(0),
                selected: criteria.is_selected(display.id.as_str()),
                value: display.id.into_inner(),
                label: display.label,
                color: display.color.map(str::to_string),
            })
            .collect();

        Self {
            name: family.display_name().to_string(),
            field: field.into(),
            family,
            facet_type: FacetType::Range,
            values,
        }
    }

    /// Terms facet, most common first, ties broken alphabetically.
    pub fn terms(
        family: MetricFamily,
        field: impl Into<String>,
        counts: &TermCounts,
        criteria: &CategoryCriteria,
    ) -> Self {
        let mut values: Vec<FacetValue> = counts
            .iter()
            .map(|(term, count)| FacetValue {
                value: term.clone(),
                label: term.to_uppercase(),
                count: *count,
                selected: criteria.is_selected(term),
                color: None,
            })
            .collect();
        values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

        Self {
            name: family.display_name().to_string(),
            field: field.into(),
            family,
            facet_type: FacetType::Terms,
            values,
        }
    }

    /// Sum of all value counts.
    pub fn total(&self) -> usize {
        self.values.iter().map(|v| v.count).sum()
    }

    pub fn selected(&self) -> impl Iterator<Item = &FacetValue> {
        self.values.iter().filter(|v| v.selected)
    }
}
