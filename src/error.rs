//! Error types
//!
//! Only constructors and parsers fail. Logging calls never return an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    /// The pattern cannot render a naive local date-time
    #[error("invalid timestamp format: {pattern:?}")]
    InvalidTimestampFormat { pattern: String },

    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),
}
