//! Locating the schema field that carries a metric family.

use crate::metric::MetricFamily;
use crate::schema::FieldDescriptor;

/// Find the field descriptor carrying `family` in a collection schema.
///
/// Priority chain, first hit wins:
/// 1. exact type tag, trying the family's canonical tags in their fixed order;
/// 2. case-insensitive keyword match against the label;
/// 3. case-insensitive keyword match against the id.
///
/// Keywords are tried most specific first, and for each keyword the schema is
/// scanned in order. `None` means the family does not apply to this
/// collection: its filter is hidden and its predicate matches everything.
pub fn detect(schema: &[FieldDescriptor], family: MetricFamily) -> Option<&FieldDescriptor> {
    for tag in family.canonical_types() {
        if let Some(field) = schema.iter().find(|f| f.field_type == *tag) {
            return Some(field);
        }
    }

    find_by_keyword(schema, family, |f| f.label.as_str())
        .or_else(|| find_by_keyword(schema, family, |f| f.id.as_str()))
}

fn find_by_keyword<'a>(
    schema: &'a [FieldDescriptor],
    family: MetricFamily,
    text_of: impl Fn(&FieldDescriptor) -> &str,
) -> Option<&'a FieldDescriptor> {
    let lowered: Vec<String> = schema.iter().map(|f| text_of(f).to_lowercase()).collect();
    family.keywords().iter().find_map(|keyword| {
        lowered
            .iter()
            .position(|text| text.contains(keyword))
            .map(|idx| &schema[idx])
    })
}

/// Fields detected for every family of one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedFields {
    pub price: Option<FieldDescriptor>,
    pub domain_authority: Option<FieldDescriptor>,
    pub traffic: Option<FieldDescriptor>,
    pub country: Option<FieldDescriptor>,
    pub link_type: Option<FieldDescriptor>,
}

impl DetectedFields {
    /// Run detection for all families.
    pub fn detect_all(schema: &[FieldDescriptor]) -> Self {
        let pick = |family| detect(schema, family).cloned();
        Self {
            price: pick(MetricFamily::Price),
            domain_authority: pick(MetricFamily::DomainAuthority),
            traffic: pick(MetricFamily::Traffic),
            country: pick(MetricFamily::Country),
            link_type: pick(MetricFamily::LinkType),
        }
    }

    /// The field detected for a family, if any.
    pub fn get(&self, family: MetricFamily) -> Option<&FieldDescriptor> {
        match family {
            MetricFamily::Price => self.price.as_ref(),
            MetricFamily::DomainAuthority => self.domain_authority.as_ref(),
            MetricFamily::Traffic => self.traffic.as_ref(),
            MetricFamily::Country => self.country.as_ref(),
            MetricFamily::LinkType => self.link_type.as_ref(),
        }
    }

    /// Families with a detected field, in presentation order.
    pub fn applicable(&self) -> Vec<MetricFamily> {
        MetricFamily::ALL
            .into_iter()
            .filter(|family| self.get(*family).is_some())
            .collect()
    }
}
