//! Bucket tables and classification.
//!
//! Contains the range interval types, the built-in tables for each numeric
//! family and the presentation metadata used for badges.

mod builtin;
mod display;
mod interval;

pub use builtin::{domain_authority_table, price_table, traffic_table};
pub use display::{da_grade, display_intervals, DaGrade, IntervalDisplay, Theme};
pub use interval::{classify, IntervalTable, RangeInterval, ValueDomain};
