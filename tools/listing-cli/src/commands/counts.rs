//! Counts command - bucket and term counts for filter badges.

use anyhow::{bail, Result};
use listing_filter::facet::Facet;
use listing_filter::filter::ListingQuery;

use super::{parse_family, parse_theme, CountsArgs};
use crate::context::Context;
use crate::output::{count_badge, Output};

/// Run the counts command.
pub fn run(args: CountsArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.snapshot(&args.snapshot)?;
    let family = args.family.as_deref().map(parse_family).transpose()?;
    let theme = args.theme.as_deref().map(parse_theme).transpose()?;

    let mut config = ctx.config.clone();
    if let Some(theme) = theme {
        config.theme = theme;
    }
    let engine = ctx.engine_with(config, snapshot.schema, snapshot.collection.as_deref());

    if let Some(family) = family {
        if engine.field(family).is_none() {
            bail!("No field for {} in this schema", family.display_name());
        }
    }

    let facets: Vec<Facet> = engine
        .facets(&snapshot.listings, &ListingQuery::new())
        .into_iter()
        .filter(|facet| family.map_or(true, |f| facet.family == f))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.info(&format!(
        "{} listings, prices in {}",
        snapshot.listings.len(),
        engine.config().currency
    ));
    for facet in &facets {
        print_facet(&ctx.output, facet);
    }

    Ok(())
}

/// Print one facet as a table of options and counts.
pub fn print_facet(output: &Output, facet: &Facet) {
    output.header(&format!("{} ({})", facet.name, facet.field));
    let widths = [24, 10, 0];
    for value in &facet.values {
        let marker = crate::output::selected_marker(value.selected);
        let label = format!("{} {}", marker, value.label);
        let color = value.color.as_deref().unwrap_or("");
        output.table_row(&[&label, color, &count_badge(value.count)], &widths);
    }
    output.kv("with data", &facet.total().to_string());
}
