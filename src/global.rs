//! Process-wide logger
//!
//! The global logger is created with default settings on first use and lives
//! until the process exits. The free functions here forward to it, for code that
//! prefers `sevlog::info("...")` over passing a `Logger` around.
//!
//! ```rust,no_run
//! use sevlog::Level;
//!
//! sevlog::set_threshold(Level::Info);
//! sevlog::debug("dropped");
//! sevlog::warning("disk almost full");
//! ```

use std::error::Error;
use std::sync::OnceLock;

use crate::config::TimestampFormat;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::SharedSink;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger
pub fn global() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(Logger::default)
}

pub fn set_threshold(level: impl Into<Option<Level>>) {
    global().set_threshold(level);
}

pub fn threshold() -> Level {
    global().threshold()
}

pub fn set_timestamp_format(format: impl Into<Option<TimestampFormat>>) {
    global().set_timestamp_format(format);
}

pub fn timestamp_format() -> TimestampFormat {
    global().timestamp_format()
}

pub fn set_primary_sink(sink: impl Into<Option<SharedSink>>) {
    global().set_primary_sink(sink);
}

pub fn primary_sink() -> SharedSink {
    global().primary_sink()
}

/// Set the override writer, or clear it with `None`
pub fn set_override_writer(writer: impl Into<Option<SharedSink>>) {
    global().set_override_writer(writer);
}

pub fn override_writer() -> Option<SharedSink> {
    global().override_writer()
}

pub fn is_enabled(level: Level) -> bool {
    global().is_enabled(level)
}

pub fn severe(message: impl AsRef<str>) {
    global().severe(message);
}

pub fn severe_error(error: &(dyn Error + 'static)) {
    global().severe_error(error);
}

pub fn warning(message: impl AsRef<str>) {
    global().warning(message);
}

pub fn warning_error(error: &(dyn Error + 'static)) {
    global().warning_error(error);
}

pub fn info(message: impl AsRef<str>) {
    global().info(message);
}

pub fn info_error(error: &(dyn Error + 'static)) {
    global().info_error(error);
}

pub fn debug(message: impl AsRef<str>) {
    global().debug(message);
}

pub fn debug_error(error: &(dyn Error + 'static)) {
    global().debug_error(error);
}
