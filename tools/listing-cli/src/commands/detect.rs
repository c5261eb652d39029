//! Detect command - show which schema field carries each metric family.

use anyhow::Result;
use listing_filter::metric::MetricFamily;
use listing_filter::schema::FieldDescriptor;
use serde::Serialize;

use super::DetectArgs;
use crate::context::Context;

#[derive(Serialize)]
struct Detection<'a> {
    family: MetricFamily,
    field: Option<&'a FieldDescriptor>,
}

/// Run the detect command.
pub fn run(args: DetectArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.snapshot(&args.snapshot)?;
    let engine = ctx.engine(snapshot.schema, snapshot.collection.as_deref());

    let detections: Vec<Detection<'_>> = MetricFamily::ALL
        .into_iter()
        .map(|family| Detection {
            family,
            field: engine.field(family),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&detections);
        return Ok(());
    }

    ctx.output.header("Detected fields");
    let widths = [18, 20, 20];
    ctx.output.table_row(&["FAMILY", "FIELD", "TYPE"], &widths);
    for detection in &detections {
        match detection.field {
            Some(field) => ctx.output.table_row(
                &[
                    detection.family.display_name(),
                    field.id.as_str(),
                    field.field_type.as_str(),
                ],
                &widths,
            ),
            None => ctx.output.table_row(
                &[detection.family.display_name(), "-", "not applicable"],
                &widths,
            ),
        }
    }

    let applicable = engine.applicable_families().len();
    println!();
    ctx.output.info(&format!(
        "{} of {} families applicable to {} fields",
        applicable,
        MetricFamily::ALL.len(),
        engine.schema().len()
    ));

    Ok(())
}
