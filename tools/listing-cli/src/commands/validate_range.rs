//! Validate-range command - check a custom min/max before filtering.

use anyhow::{bail, Result};
use listing_filter::filter::CustomRange;

use super::{parse_family, ValidateRangeArgs};
use crate::context::Context;

/// Run the validate-range command.
pub fn run(args: ValidateRangeArgs, ctx: &Context) -> Result<()> {
    let family = parse_family(&args.family)?;
    if !family.is_numeric() {
        bail!("Family '{}' has no numeric ranges", family);
    }

    let engine = ctx.engine(Vec::new(), None);
    let range = CustomRange::new(args.min, args.max);
    let validation = engine.validate_range(family, &range);

    if ctx.output.is_json() {
        ctx.output.json(&validation);
    } else {
        ctx.output.kv("family", family.display_name());
        ctx.output.kv("min", &format_bound(args.min));
        ctx.output.kv("max", &format_bound(args.max));
    }

    match validation.error {
        Some(error) => bail!(error),
        None => {
            ctx.output.success("Range is valid");
            Ok(())
        }
    }
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map_or_else(|| "unbounded".to_string(), |v| v.to_string())
}
