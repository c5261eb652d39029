//! Structured logging with collection context.

use std::collections::BTreeMap;
use std::time::Instant;

use listing_filter::log::{FilterLog, LogFields, LogLevel};
use serde::Serialize;

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Listing collection the engine is working on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since logger creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}", self.level, self.message);

        if let Some(collection) = &self.collection {
            s.push_str(&format!(" <{}>", collection));
        }

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// Structured logger writing engine events to stderr.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    collection: Option<String>,
    start_time: Instant,
    min_level: LogLevel,
    format: LogFormat,
    timestamps: bool,
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredLogger {
    /// Create a logger at info level, JSON format.
    pub fn new() -> Self {
        Self {
            collection: None,
            start_time: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            timestamps: true,
        }
    }

    /// Set the collection name attached to every entry.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Omit elapsed time from entries.
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Build the entry for an event, or `None` if below the minimum level.
    pub fn entry(&self, level: LogLevel, message: &str, fields: LogFields<'_>) -> Option<LogEntry> {
        if level < self.min_level {
            return None;
        }

        Some(LogEntry {
            level,
            message: message.to_string(),
            collection: self.collection.clone(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            elapsed_us: self
                .timestamps
                .then(|| self.start_time.elapsed().as_micros() as u64),
        })
    }

    /// Render an event in the configured format.
    pub fn render(&self, level: LogLevel, message: &str, fields: LogFields<'_>) -> Option<String> {
        let entry = self.entry(level, message, fields)?;
        Some(match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        })
    }
}

impl FilterLog for StructuredLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, message: &str, fields: LogFields<'_>) {
        if let Some(line) = self.render(level, message, fields) {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_level_gate() {
        let logger = StructuredLogger::new().with_min_level(LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
        assert!(logger.render(LogLevel::Debug, "skipped", &[]).is_none());
    }

    #[test]
    fn test_json_entry_flattens_fields() {
        let logger = StructuredLogger::new()
            .with_collection("guest-posts")
            .without_timestamps();
        let line = logger
            .render(
                LogLevel::Info,
                "filter applied",
                &[("input", Value::from(10)), ("matched", Value::from(4))],
            )
            .unwrap();

        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            parsed,
            json!({
                "level": "info",
                "message": "filter applied",
                "collection": "guest-posts",
                "input": 10,
                "matched": 4
            })
        );
    }

    #[test]
    fn test_human_entry() {
        let logger = StructuredLogger::new()
            .with_format(LogFormat::Human)
            .with_min_level(LogLevel::Debug)
            .without_timestamps();
        let line = logger
            .render(
                LogLevel::Warn,
                "custom range rejected",
                &[("family", Value::from("price"))],
            )
            .unwrap();
        assert_eq!(line, "[WARN] custom range rejected | family=\"price\"");
    }

    #[test]
    fn test_elapsed_is_recorded_by_default() {
        let logger = StructuredLogger::new();
        let entry = logger.entry(LogLevel::Error, "boom", &[]).unwrap();
        assert!(entry.elapsed_us.is_some());
    }
}
