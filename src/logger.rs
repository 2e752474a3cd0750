//! The logger
//!
//! A `Logger` owns its configuration behind a single `RwLock`. Setters change
//! one field at a time. A log call checks the threshold under the read lock
//! and, only when the message passes, clones a snapshot under that same guard
//! and formats and writes from it, so a call never sees a half-applied
//! configuration and setters never wait on a slow sink.
//!
//! Logging never fails from the caller's point of view. Filtered calls return
//! before anything is copied or rendered. A sink that errors or panics loses
//! the line, and the failure is reported through `tracing` at debug level.

use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::clock::{Clock, SystemClock};
use crate::config::{LoggerConfig, LoggerSettings, TimestampFormat};
use crate::level::Level;
use crate::report::render_error;
use crate::sink::SharedSink;

/// Leveled logger writing one timestamped line per accepted message
pub struct Logger {
    config: RwLock<LoggerConfig>,
    clock: Box<dyn Clock>,
}

impl Logger {
    /// Create a logger reading the system clock
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Create a logger with a custom time source
    pub fn with_clock<C: Clock>(config: LoggerConfig, clock: C) -> Self {
        Self {
            config: RwLock::new(config),
            clock: Box::new(clock),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LoggerConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoggerConfig> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.read().clone()
    }

    /// Set the threshold; `None` keeps the current one
    pub fn set_threshold(&self, level: impl Into<Option<Level>>) {
        if let Some(level) = level.into() {
            self.write().threshold = level;
        }
    }

    /// Current threshold
    pub fn threshold(&self) -> Level {
        self.read().threshold
    }

    /// Set the timestamp pattern; `None` keeps the current one
    pub fn set_timestamp_format(&self, format: impl Into<Option<TimestampFormat>>) {
        if let Some(format) = format.into() {
            self.write().timestamp_format = format;
        }
    }

    /// Current timestamp pattern
    pub fn timestamp_format(&self) -> TimestampFormat {
        self.read().timestamp_format.clone()
    }

    /// Set the default destination; `None` keeps the current one
    pub fn set_primary_sink(&self, sink: impl Into<Option<SharedSink>>) {
        if let Some(sink) = sink.into() {
            self.write().primary_sink = sink;
        }
    }

    /// Current default destination
    pub fn primary_sink(&self) -> SharedSink {
        self.read().primary_sink.clone()
    }

    /// Set or clear the override writer
    ///
    /// While set, it receives every line instead of the primary sink. `None`
    /// clears it and output goes back to the primary sink.
    pub fn set_override_writer(&self, writer: impl Into<Option<SharedSink>>) {
        self.write().override_writer = writer.into();
    }

    /// Current override writer, if any
    pub fn override_writer(&self) -> Option<SharedSink> {
        self.read().override_writer.clone()
    }

    /// Apply the fields present in `settings`
    pub fn apply_settings(&self, settings: &LoggerSettings) {
        let mut config = self.write();
        if let Some(level) = settings.threshold {
            config.threshold = level;
        }
        if let Some(format) = &settings.timestamp_format {
            config.timestamp_format = format.clone();
        }
    }

    /// Whether a message at `level` would currently be written
    pub fn is_enabled(&self, level: Level) -> bool {
        self.read().threshold.permits(level)
    }

    /// Log a message at `SEVERE`
    pub fn severe(&self, message: impl AsRef<str>) {
        self.log(Level::Severe, message.as_ref());
    }

    /// Log an error and its causes at `SEVERE`
    pub fn severe_error(&self, error: &(dyn Error + 'static)) {
        self.log_error(Level::Severe, error);
    }

    /// Log a message at `WARNING`
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(Level::Warning, message.as_ref());
    }

    /// Log an error and its causes at `WARNING`
    pub fn warning_error(&self, error: &(dyn Error + 'static)) {
        self.log_error(Level::Warning, error);
    }

    /// Log a message at `INFO`
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::Info, message.as_ref());
    }

    /// Log an error and its causes at `INFO`
    pub fn info_error(&self, error: &(dyn Error + 'static)) {
        self.log_error(Level::Info, error);
    }

    /// Log a message at `DEBUG`
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::Debug, message.as_ref());
    }

    /// Log an error and its causes at `DEBUG`
    pub fn debug_error(&self, error: &(dyn Error + 'static)) {
        self.log_error(Level::Debug, error);
    }

    fn log_error(&self, level: Level, error: &(dyn Error + 'static)) {
        // Skip rendering the report when the line would be dropped anyway
        if self.is_enabled(level) {
            self.log(level, &render_error(error));
        }
    }

    fn log(&self, level: Level, message: &str) {
        let config = {
            let config = self.read();
            if !config.threshold.permits(level) {
                return;
            }
            config.clone()
        };

        let line = format_line(&config.timestamp_format, &self.clock.now(), level, message);
        let sink = config.active_sink();
        match panic::catch_unwind(AssertUnwindSafe(|| sink.write_line(&line))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(error = %e, level = %level, "Dropped log line, sink write failed");
            }
            Err(_) => {
                tracing::debug!(level = %level, "Dropped log line, sink panicked");
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.read())
            .finish_non_exhaustive()
    }
}

/// Build `[<timestamp> | <LEVEL>] <message>`
///
/// The message is copied verbatim; embedded newlines and brackets are kept.
pub fn format_line(
    format: &TimestampFormat,
    at: &chrono::NaiveDateTime,
    level: Level,
    message: &str,
) -> String {
    let timestamp = format.render(at);
    let mut line = String::with_capacity(timestamp.len() + level.name().len() + message.len() + 6);
    line.push('[');
    line.push_str(&timestamp);
    line.push_str(" | ");
    line.push_str(level.name());
    line.push_str("] ");
    line.push_str(message);
    line
}
