//! Severity levels
//!
//! Each level carries an integer weight. A message is emitted when its weight is
//! at least the weight of the configured threshold. `Off` and `All` only make
//! sense as thresholds.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Threshold that suppresses every message
    Off,
    /// Critical errors only
    Severe,
    /// Warnings and above
    Warning,
    /// Informational messages and above
    Info,
    /// Debug detail and above
    Debug,
    /// Threshold that suppresses nothing
    All,
}

impl Level {
    /// Every level, from most to least restrictive
    pub const ALL_LEVELS: [Level; 6] = [
        Level::Off,
        Level::Severe,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::All,
    ];

    /// Ordering weight used by the threshold comparison
    pub fn weight(self) -> i32 {
        match self {
            Level::Off => i32::MAX,
            Level::Severe => 1000,
            Level::Warning => 900,
            Level::Info => 800,
            Level::Debug => 700,
            Level::All => i32::MIN,
        }
    }

    /// Upper-case symbolic name, as written in log lines
    pub fn name(self) -> &'static str {
        match self {
            Level::Off => "OFF",
            Level::Severe => "SEVERE",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::All => "ALL",
        }
    }

    /// True for the threshold-only levels `Off` and `All`
    pub fn is_sentinel(self) -> bool {
        matches!(self, Level::Off | Level::All)
    }

    /// Whether a message at `level` passes when `self` is the threshold
    pub fn permits(self, level: Level) -> bool {
        level.weight() >= self.weight()
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL_LEVELS
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LoggerError::UnknownLevel(trimmed.to_string()))
    }
}
