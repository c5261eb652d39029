//! Logging port.
//!
//! The engine facade reports what it did through an injected [`FilterLog`].
//! Classification and filtering functions never log. The default sink is
//! [`NoopLog`]; concrete sinks live in `listing-observability`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Log level for engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Structured key/value pairs attached to an event.
pub type LogFields<'a> = &'a [(&'a str, Value)];

/// Sink for engine events.
pub trait FilterLog: Send + Sync {
    /// Whether events at `level` would be recorded. Lets callers skip
    /// building fields nobody reads.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, level: LogLevel, message: &str, fields: LogFields<'_>);

    fn debug(&self, message: &str, fields: LogFields<'_>) {
        self.log(LogLevel::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: LogFields<'_>) {
        self.log(LogLevel::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: LogFields<'_>) {
        self.log(LogLevel::Warn, message, fields);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl FilterLog for NoopLog {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _message: &str, _fields: LogFields<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Error > LogLevel::Warn);
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_noop_is_disabled() {
        let log = NoopLog;
        assert!(!log.enabled(LogLevel::Error));
        log.info("ignored", &[("count", Value::from(3))]);
    }
}
