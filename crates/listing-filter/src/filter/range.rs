//! User-supplied custom ranges.

use crate::error::RangeError;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range; a `None` bound is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl CustomRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// `[min, max]`.
    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// `[min, +inf)`.
    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    /// `(-inf, max]`.
    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Reject negative bounds and inverted ranges.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.min.is_some_and(|min| min < 0.0) {
            return Err(RangeError::NegativeMin);
        }
        if self.max.is_some_and(|max| max < 0.0) {
            return Err(RangeError::NegativeMax);
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(RangeError::MinAboveMax);
            }
        }
        Ok(())
    }

    /// Validation result in the shape form controls consume.
    pub fn validation(&self) -> RangeValidation {
        match self.validate() {
            Ok(()) => RangeValidation::valid(),
            Err(e) => RangeValidation::invalid(e.to_string()),
        }
    }
}

/// Outcome of validating a custom range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RangeValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}
