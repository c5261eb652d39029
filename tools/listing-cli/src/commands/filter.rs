//! Filter command - apply a query and list the matching listings.

use std::collections::BTreeMap;

use anyhow::{bail, Context as _, Result};
use listing_filter::filter::{CategoryCriteria, ListingQuery};
use listing_filter::metric::MetricFamily;
use listing_filter::ListingEngine;
use serde::Serialize;

use super::counts::print_facet;
use super::{custom_range, extend_criteria, FilterArgs};
use crate::context::Context;

#[derive(Serialize)]
struct MatchedListing<'a> {
    id: &'a str,
    buckets: BTreeMap<&'static str, &'a str>,
}

#[derive(Serialize)]
struct FilterReport<'a> {
    total: usize,
    matched: usize,
    items: Vec<MatchedListing<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets: Option<&'a [listing_filter::facet::Facet]>,
}

/// Run the filter command.
pub fn run(args: FilterArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.snapshot(&args.snapshot)?;
    let engine = ctx.engine(snapshot.schema, snapshot.collection.as_deref());

    let base = match &args.query {
        Some(path) => load_query(ctx, path)?,
        None => ListingQuery::new(),
    };
    let query = build_query(base, &args);

    validate_query(&engine, &query)?;
    warn_unknown_buckets(ctx, &engine, &query);

    let outcome = engine.apply(&snapshot.listings, &query);

    let items: Vec<MatchedListing<'_>> = outcome
        .items
        .iter()
        .map(|listing| MatchedListing {
            id: listing.id.as_str(),
            buckets: MetricFamily::ALL
                .into_iter()
                .filter_map(|family| {
                    let id = engine.classify(listing, family)?;
                    let label = engine.table(family)?.get(id)?.label.as_str();
                    Some((family.as_str(), label))
                })
                .collect(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&FilterReport {
            total: outcome.total,
            matched: outcome.len(),
            items,
            facets: args.facets.then_some(outcome.facets.as_slice()),
        });
        return Ok(());
    }

    ctx.output.header("Matching listings");
    for item in &items {
        let buckets: Vec<String> = item
            .buckets
            .iter()
            .map(|(family, label)| format!("{}={}", family, label))
            .collect();
        ctx.output.table_row(&[item.id, &buckets.join("  ")], &[16, 0]);
    }

    if args.facets {
        for facet in &outcome.facets {
            print_facet(&ctx.output, facet);
        }
    }

    println!();
    ctx.output.success(&format!(
        "{} of {} listings matched ({} hidden)",
        outcome.len(),
        outcome.total,
        outcome.hidden()
    ));

    Ok(())
}

fn load_query(ctx: &Context, path: &str) -> Result<ListingQuery> {
    let path = ctx.resolve_path(path);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read query: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse query: {}", path.display()))
}

/// Layer the command-line selections over a saved query.
fn build_query(base: ListingQuery, args: &FilterArgs) -> ListingQuery {
    let price = extend_criteria(
        base.price,
        &args.price,
        custom_range(args.price_min, args.price_max),
    );
    let domain_authority =
        extend_criteria(base.domain_authority, &args.da, custom_range(args.da_min, args.da_max));
    let traffic = extend_criteria(
        base.traffic,
        &args.traffic,
        custom_range(args.traffic_min, args.traffic_max),
    );

    ListingQuery::new()
        .with_price(price)
        .with_domain_authority(domain_authority)
        .with_traffic(traffic)
        .with_country(extend_terms(base.country, &args.country))
        .with_link_type(extend_terms(base.link_type, &args.link_type))
}

fn extend_terms(mut criteria: CategoryCriteria, terms: &[String]) -> CategoryCriteria {
    for term in terms {
        criteria.select(term);
    }
    criteria
}

/// Refuse to filter with an invalid custom range.
fn validate_query(engine: &ListingEngine, query: &ListingQuery) -> Result<()> {
    for family in MetricFamily::ALL {
        let Some(range) = query.numeric(family).and_then(|c| c.custom_range.as_ref()) else {
            continue;
        };
        if let Some(error) = engine.validate_range(family, range).error {
            bail!("Invalid {} range: {}", family.display_name(), error);
        }
    }
    Ok(())
}

fn warn_unknown_buckets(ctx: &Context, engine: &ListingEngine, query: &ListingQuery) {
    for family in MetricFamily::ALL {
        let (Some(criteria), Some(table)) = (query.numeric(family), engine.table(family)) else {
            continue;
        };
        for id in &criteria.selected_interval_ids {
            if table.get(id.as_str()).is_none() {
                ctx.output.warn(&format!(
                    "Unknown {} bucket '{}' never matches",
                    family.display_name(),
                    id
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use listing_filter::filter::{CustomRange, FilterCriteria};
    use listing_filter::schema::{FieldDescriptor, FieldTypeTag};

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: FilterArgs,
    }

    fn args(argv: &[&str]) -> FilterArgs {
        let mut full = vec!["listings", "snapshot.json"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_flags_build_query() {
        let args = args(&["--da", "A", "--da", "B", "--price-min", "10", "--country", "BR"]);
        let query = build_query(ListingQuery::new(), &args);

        assert!(query.domain_authority.is_selected("A"));
        assert!(query.domain_authority.is_selected("B"));
        assert_eq!(query.price.custom_range, Some(CustomRange::at_least(10.0)));
        assert!(query.country.is_selected("br"));
        assert!(query.traffic.is_empty());
    }

    #[test]
    fn test_flags_extend_saved_query() {
        let saved = ListingQuery::new()
            .with_traffic(FilterCriteria::new().with_interval("traffic_1k_10k"))
            .with_link_type(CategoryCriteria::new().with_term("dofollow"));
        let query = build_query(saved, &args(&["--traffic", "traffic_10k_100k"]));

        assert!(query.traffic.is_selected("traffic_1k_10k"));
        assert!(query.traffic.is_selected("traffic_10k_100k"));
        assert!(query.link_type.is_selected("dofollow"));
    }

    #[test]
    fn test_negative_bound_is_rejected() {
        let engine = ListingEngine::new(vec![FieldDescriptor::new(
            "product",
            FieldTypeTag::Product,
            "Produto",
        )]);
        let query = build_query(ListingQuery::new(), &args(&["--price-min", "-5"]));

        let err = validate_query(&engine, &query).unwrap_err().to_string();
        assert_eq!(err, "Invalid Price range: Minimum value cannot be negative");
    }
}
