//! sevlog - minimal leveled logging
//!
//! Messages carry a severity (`SEVERE`, `WARNING`, `INFO`, `DEBUG`) and are
//! written as `[<timestamp> | <LEVEL>] <message>` lines to a configurable sink
//! when they reach the configured threshold.
//!
//! Use the process-wide facade through the free functions, or build a
//! [`Logger`] and pass it around.

pub mod capture;
pub mod clock;
pub mod config;
pub mod error;
mod global;
pub mod level;
pub mod logger;
pub mod report;
pub mod sink;

#[cfg(test)]
mod test_tracing;

pub use capture::{CaptureEvent, LineCapture};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LoggerConfig, LoggerSettings, TimestampFormat};
pub use error::LoggerError;
pub use global::{
    debug, debug_error, global, info, info_error, is_enabled, override_writer, primary_sink,
    set_override_writer, set_primary_sink, set_threshold, set_timestamp_format, severe,
    severe_error, threshold, timestamp_format, warning, warning_error,
};
pub use level::Level;
pub use logger::Logger;
pub use sink::SharedSink;
