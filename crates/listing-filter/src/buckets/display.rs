//! Presentation metadata for buckets.
//!
//! Grades and colors are for badges only. Matching never looks at them, and
//! the theme is always passed in explicitly.

use super::interval::IntervalTable;
use crate::ids::IntervalId;
use crate::metric::MetricFamily;
use serde::{Deserialize, Serialize};

/// Color theme of the consuming UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Letter grade and colors attached to a Domain Authority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaGrade {
    pub letter: char,
    pub light_color: &'static str,
    pub dark_color: &'static str,
}

impl DaGrade {
    pub fn color(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Light => self.light_color,
            Theme::Dark => self.dark_color,
        }
    }
}

const DA_GRADES: [DaGrade; 5] = [
    DaGrade {
        letter: 'A',
        light_color: "#15803d",
        dark_color: "#4ade80",
    },
    DaGrade {
        letter: 'B',
        light_color: "#4d7c0f",
        dark_color: "#a3e635",
    },
    DaGrade {
        letter: 'C',
        light_color: "#a16207",
        dark_color: "#facc15",
    },
    DaGrade {
        letter: 'D',
        light_color: "#c2410c",
        dark_color: "#fb923c",
    },
    DaGrade {
        letter: 'F',
        light_color: "#b91c1c",
        dark_color: "#f87171",
    },
];

/// Grade for a Domain Authority bucket id ("A".."F").
pub fn da_grade(id: &str) -> Option<DaGrade> {
    let mut chars = id.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    DA_GRADES.iter().copied().find(|grade| grade.letter == letter)
}

/// A bucket ready for badge rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalDisplay {
    pub id: IntervalId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

/// Display entries for every bucket of a table, in table order.
///
/// Letter grades only apply to Domain Authority tables.
pub fn display_intervals(
    table: &IntervalTable,
    family: MetricFamily,
    theme: Theme,
) -> Vec<IntervalDisplay> {
    table
        .intervals
        .iter()
        .map(|interval| {
            let grade = match family {
                MetricFamily::DomainAuthority => da_grade(interval.id.as_str()),
                MetricFamily::Price
                | MetricFamily::Traffic
                | MetricFamily::Country
                | MetricFamily::LinkType => None,
            };
            IntervalDisplay {
                id: interval.id.clone(),
                label: interval.label.clone(),
                grade: grade.map(|g| g.letter),
                color: grade.map(|g| g.color(theme)),
            }
        })
        .collect()
}
