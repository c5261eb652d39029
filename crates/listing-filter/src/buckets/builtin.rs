//! Hand-authored bucket tables.
//!
//! Bucket ids and boundaries are persisted in saved filter state, so they
//! must not drift. Price buckets are cent-granular: each lower bound sits one
//! cent above the previous upper bound.

use super::interval::{IntervalTable, RangeInterval, ValueDomain};
use crate::money::{Currency, Money};

/// Domain Authority: five letter grades covering `[0, 100]`.
pub fn domain_authority_table() -> IntervalTable {
    IntervalTable::new(
        "domain_authority",
        ValueDomain::closed(0.0, 100.0),
        vec![
            RangeInterval::new("F", "F (0-19)", 0.0, Some(19.0)),
            RangeInterval::new("D", "D (20-39)", 20.0, Some(39.0)),
            RangeInterval::new("C", "C (40-59)", 40.0, Some(59.0)),
            RangeInterval::new("B", "B (60-79)", 60.0, Some(79.0)),
            RangeInterval::new("A", "A (80-100)", 80.0, Some(100.0)),
        ],
    )
}

/// Traffic: six buckets from 1 visit upward.
pub fn traffic_table() -> IntervalTable {
    IntervalTable::new(
        "traffic",
        ValueDomain::positive(),
        vec![
            RangeInterval::new("traffic_1_10", "1 - 10", 1.0, Some(10.0)),
            RangeInterval::new("traffic_11_100", "11 - 100", 11.0, Some(100.0)),
            RangeInterval::new("traffic_101_1k", "101 - 1K", 101.0, Some(1_000.0)),
            RangeInterval::new("traffic_1k_10k", "1K - 10K", 1_001.0, Some(10_000.0)),
            RangeInterval::new("traffic_10k_100k", "10K - 100K", 10_001.0, Some(100_000.0)),
            RangeInterval::new("traffic_100k_plus", "100K+", 100_001.0, None),
        ],
    )
}

/// Price: seven buckets, labelled in `currency`.
pub fn price_table(currency: Currency) -> IntervalTable {
    // (id, lower label, upper in whole units)
    const BOUNDS: [(&str, i64, Option<i64>); 7] = [
        ("price_1_50", 1, Some(50)),
        ("price_50_100", 50, Some(100)),
        ("price_100_200", 100, Some(200)),
        ("price_200_500", 200, Some(500)),
        ("price_500_1000", 500, Some(1_000)),
        ("price_1000_5000", 1_000, Some(5_000)),
        ("price_5000_plus", 5_000, None),
    ];

    let whole = |units: i64| Money::new(units * 100, currency).display_whole();

    let intervals = BOUNDS
        .iter()
        .enumerate()
        .map(|(i, (id, lower, upper))| {
            let label = match upper {
                Some(upper) => format!("{} - {}", whole(*lower), whole(*upper)),
                None => format!("{}+", whole(*lower)),
            };
            // First bucket starts at its label; the rest start one cent above
            // the previous bucket's upper bound.
            let min = if i == 0 {
                *lower as f64
            } else {
                Money::new(lower * 100 + 1, currency).to_decimal()
            };
            RangeInterval::new(*id, label, min, upper.map(|u| u as f64))
        })
        .collect();

    IntervalTable::new("price", ValueDomain::positive(), intervals)
}
