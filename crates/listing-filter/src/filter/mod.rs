//! Filter module.
//!
//! Contains the per-family criteria types, custom-range validation and the
//! predicate builders.

mod category;
mod criteria;
mod query;
mod range;

pub use category::{build_category_predicate, CategoryCriteria};
pub use criteria::{build_predicate, FilterCriteria, ListingPredicate};
pub use query::ListingQuery;
pub use range::{CustomRange, RangeValidation};
