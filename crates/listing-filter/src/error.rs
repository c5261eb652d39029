//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the filtering engine.
///
/// Value parsing and price resolution never produce these; they degrade to
/// "no data" instead, and custom ranges report a [`RangeError`]. These only
/// come from loading externalized bucket tables.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A bucket table failed validation.
    #[error("Invalid bucket table '{table}': {reason}")]
    InvalidTable { table: String, reason: String },

    /// A configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration content could not be parsed.
    #[error("Config parse error: {0}")]
    Config(String),
}

/// Reasons a custom numeric range is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("Minimum value cannot be negative")]
    NegativeMin,

    #[error("Maximum value cannot be negative")]
    NegativeMax,

    #[error("Minimum value cannot be greater than maximum value")]
    MinAboveMax,
}

impl From<serde_json::Error> for FilterError {
    fn from(e: serde_json::Error) -> Self {
        FilterError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for FilterError {
    fn from(e: toml::de::Error) -> Self {
        FilterError::Config(e.to_string())
    }
}

impl FilterError {
    pub(crate) fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_messages() {
        assert_eq!(
            RangeError::NegativeMin.to_string(),
            "Minimum value cannot be negative"
        );
        assert_eq!(
            RangeError::MinAboveMax.to_string(),
            "Minimum value cannot be greater than maximum value"
        );
    }

    #[test]
    fn test_parse_errors_are_config_errors() {
        let err: FilterError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FilterError::Config(_)));
        assert!(err.to_string().starts_with("Config parse error: "));
    }
}
