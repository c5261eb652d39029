//! Logging sinks for the listing filtering engine.
//!
//! This crate provides:
//! - `StructuredLogger` - JSON or human-readable logs on stderr
//! - `TracingLog` - forwards engine events to `tracing`

mod logging;
mod tracing_log;

pub use logging::*;
pub use tracing_log::*;

// Re-export the port types for convenience
pub use listing_filter::log::{FilterLog, LogLevel, NoopLog};
