//! CLI command implementations.

pub mod counts;
pub mod detect;
pub mod filter;
pub mod validate_range;

use anyhow::{anyhow, Result};
use clap::Args;
use listing_filter::buckets::Theme;
use listing_filter::filter::{CustomRange, FilterCriteria};
use listing_filter::metric::MetricFamily;

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Snapshot file with schema and listings.
    pub snapshot: String,
}

/// Arguments for the counts command.
#[derive(Args)]
pub struct CountsArgs {
    /// Snapshot file with schema and listings.
    pub snapshot: String,

    /// Only count this family (price, domain_authority, traffic, country, link_type).
    #[arg(short, long)]
    pub family: Option<String>,

    /// Badge color theme (light or dark).
    #[arg(long)]
    pub theme: Option<String>,
}

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    /// Snapshot file with schema and listings.
    pub snapshot: String,

    /// JSON file with a saved query; flags below are added on top.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Select a price bucket (repeatable).
    #[arg(long = "price")]
    pub price: Vec<String>,

    /// Custom price range minimum.
    #[arg(long, allow_hyphen_values = true)]
    pub price_min: Option<f64>,

    /// Custom price range maximum.
    #[arg(long, allow_hyphen_values = true)]
    pub price_max: Option<f64>,

    /// Select a Domain Authority bucket (repeatable).
    #[arg(long = "da")]
    pub da: Vec<String>,

    /// Custom Domain Authority range minimum.
    #[arg(long, allow_hyphen_values = true)]
    pub da_min: Option<f64>,

    /// Custom Domain Authority range maximum.
    #[arg(long, allow_hyphen_values = true)]
    pub da_max: Option<f64>,

    /// Select a traffic bucket (repeatable).
    #[arg(long = "traffic")]
    pub traffic: Vec<String>,

    /// Custom traffic range minimum.
    #[arg(long, allow_hyphen_values = true)]
    pub traffic_min: Option<f64>,

    /// Custom traffic range maximum.
    #[arg(long, allow_hyphen_values = true)]
    pub traffic_max: Option<f64>,

    /// Select a country (repeatable).
    #[arg(long = "country")]
    pub country: Vec<String>,

    /// Select a link type (repeatable).
    #[arg(long = "link-type")]
    pub link_type: Vec<String>,

    /// Also print facets.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the validate-range command.
#[derive(Args)]
pub struct ValidateRangeArgs {
    /// Range minimum.
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Range maximum.
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Family the range is for.
    #[arg(short, long, default_value = "price")]
    pub family: String,
}

/// Parse a family name or alias.
pub fn parse_family(name: &str) -> Result<MetricFamily> {
    MetricFamily::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = MetricFamily::ALL.iter().map(|f| f.as_str()).collect();
        anyhow!("Unknown family '{}' (expected one of: {})", name, known.join(", "))
    })
}

pub fn parse_theme(name: &str) -> Result<Theme> {
    match name.to_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        _ => Err(anyhow!("Unknown theme '{}' (expected light or dark)", name)),
    }
}

/// Custom range from optional flags; `None` when neither bound was given.
pub fn custom_range(min: Option<f64>, max: Option<f64>) -> Option<CustomRange> {
    if min.is_none() && max.is_none() {
        None
    } else {
        Some(CustomRange::new(min, max))
    }
}

/// Add selected bucket ids and a custom range to `criteria`.
pub fn extend_criteria(
    mut criteria: FilterCriteria,
    ids: &[String],
    range: Option<CustomRange>,
) -> FilterCriteria {
    for id in ids {
        criteria = criteria.with_interval(id.as_str());
    }
    if let Some(range) = range {
        criteria = criteria.with_custom_range(range);
    }
    criteria
}
