//! Bridge from the engine's logging port to `tracing`.

use listing_filter::log::{FilterLog, LogFields, LogLevel};

/// Forwards engine events to `tracing` under the `listing_filter` target.
///
/// Fields are rendered into a single `fields` value since `tracing` needs
/// field names at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl TracingLog {
    pub fn new() -> Self {
        Self
    }
}

fn render_fields(fields: LogFields<'_>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl FilterLog for TracingLog {
    fn enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Trace => tracing::enabled!(target: "listing_filter", tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: "listing_filter", tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(target: "listing_filter", tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(target: "listing_filter", tracing::Level::WARN),
            LogLevel::Error => tracing::enabled!(target: "listing_filter", tracing::Level::ERROR),
        }
    }

    fn log(&self, level: LogLevel, message: &str, fields: LogFields<'_>) {
        let fields = render_fields(fields);
        match level {
            LogLevel::Trace => {
                tracing::trace!(target: "listing_filter", fields = %fields, "{}", message)
            }
            LogLevel::Debug => {
                tracing::debug!(target: "listing_filter", fields = %fields, "{}", message)
            }
            LogLevel::Info => {
                tracing::info!(target: "listing_filter", fields = %fields, "{}", message)
            }
            LogLevel::Warn => {
                tracing::warn!(target: "listing_filter", fields = %fields, "{}", message)
            }
            LogLevel::Error => {
                tracing::error!(target: "listing_filter", fields = %fields, "{}", message)
            }
        }
    }
}
