//! Term filters for categorical families (country, link type).

use super::criteria::ListingPredicate;
use crate::listing::ListingRecord;
use crate::metric::category_value;
use crate::schema::FieldDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selected terms for one categorical family. Terms are stored trimmed and
/// lowercased; matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCriteria {
    #[serde(default)]
    selected: BTreeSet<String>,
}

impl CategoryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a term.
    pub fn with_term(mut self, term: impl AsRef<str>) -> Self {
        self.select(term);
        self
    }

    /// Select a term. Blank terms are ignored.
    pub fn select(&mut self, term: impl AsRef<str>) {
        let term = term.as_ref().trim().to_lowercase();
        if !term.is_empty() {
            self.selected.insert(term);
        }
    }

    pub fn deselect(&mut self, term: &str) {
        self.selected.remove(&term.trim().to_lowercase());
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, term: &str) -> bool {
        self.selected.contains(&term.trim().to_lowercase())
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Empty criteria pass everything; otherwise a listing without a term
    /// fails and a listing with a term passes if it is selected.
    pub fn matches(&self, term: Option<&str>) -> bool {
        if self.is_empty() {
            return true;
        }
        term.is_some_and(|term| self.selected.contains(term))
    }
}

/// Build the inclusion predicate for a categorical family.
pub fn build_category_predicate<'a>(
    criteria: &'a CategoryCriteria,
    field: &'a FieldDescriptor,
) -> ListingPredicate<'a> {
    if criteria.is_empty() {
        return Box::new(|_: &ListingRecord| true);
    }
    Box::new(move |listing: &ListingRecord| {
        criteria.matches(category_value(listing, field).as_deref())
    })
}
