//! Logger configuration
//!
//! `LoggerConfig` is the full four-field snapshot a logger works from.
//! `LoggerSettings` is the serializable subset a host can keep in its own
//! configuration file or read from the environment.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::LoggerError;
use crate::level::Level;
use crate::sink::SharedSink;

/// Default timestamp pattern, `yyyy-MM-dd HH:mm:ss` in strftime spelling
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable holding the threshold name
pub const LEVEL_ENV_VAR: &str = "SEVLOG_LEVEL";

/// Environment variable holding the timestamp pattern
pub const TIMESTAMP_FORMAT_ENV_VAR: &str = "SEVLOG_TIMESTAMP_FORMAT";

/// Validated strftime pattern for log line timestamps
///
/// Construction renders a sample date-time, so patterns chrono cannot format
/// for a naive local time (unknown specifiers, `%z`, `%Z`) are rejected up
/// front and `render` cannot fail later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampFormat {
    pattern: String,
}

impl TimestampFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self, LoggerError> {
        let pattern = pattern.into();
        let mut probe = String::new();
        if write!(probe, "{}", NaiveDateTime::default().format(&pattern)).is_err() {
            return Err(LoggerError::InvalidTimestampFormat { pattern });
        }
        Ok(Self { pattern })
    }

    /// The raw strftime pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format a date-time with this pattern
    pub fn render(&self, at: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.pattern)).is_err() {
            out.clear();
            let _ = write!(out, "{}", at.format(DEFAULT_TIMESTAMP_FORMAT));
        }
        out
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = LoggerError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(pattern)
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.pattern
    }
}

/// Snapshot of everything a logger needs to filter, format and write
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level a message must reach to be written
    pub threshold: Level,
    /// Pattern for the timestamp at the start of each line
    pub timestamp_format: TimestampFormat,
    /// Destination used when no override writer is set
    pub primary_sink: SharedSink,
    /// Destination that replaces the primary sink while set
    pub override_writer: Option<SharedSink>,
}

impl LoggerConfig {
    /// The sink the next line goes to
    pub fn active_sink(&self) -> &SharedSink {
        self.override_writer.as_ref().unwrap_or(&self.primary_sink)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Level::Debug,
            timestamp_format: TimestampFormat::default(),
            primary_sink: SharedSink::stderr(),
            override_writer: None,
        }
    }
}

/// Host-facing settings; unset fields leave the logger untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub threshold: Option<Level>,
    pub timestamp_format: Option<TimestampFormat>,
}

impl LoggerSettings {
    /// Read settings from `SEVLOG_LEVEL` and `SEVLOG_TIMESTAMP_FORMAT`
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read settings through a custom variable lookup
    ///
    /// Values that fail to parse are skipped with a warning.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let threshold = lookup(LEVEL_ENV_VAR).and_then(|raw| match raw.parse::<Level>() {
            Ok(level) => Some(level),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", LEVEL_ENV_VAR, e);
                None
            }
        });

        let timestamp_format =
            lookup(TIMESTAMP_FORMAT_ENV_VAR).and_then(|raw| match TimestampFormat::new(raw) {
                Ok(format) => Some(format),
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", TIMESTAMP_FORMAT_ENV_VAR, e);
                    None
                }
            });

        Self {
            threshold,
            timestamp_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tracing::capture_events;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn sample_instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_default_timestamp_format() {
        let format = TimestampFormat::default();
        assert_eq!(format.pattern(), "%Y-%m-%d %H:%M:%S");
        assert_eq!(format.render(&sample_instant()), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let format = TimestampFormat::new("%d/%m/%Y %H:%M").unwrap();
        assert_eq!(format.render(&sample_instant()), "02/01/2024 03:04");
    }

    #[test]
    fn test_invalid_timestamp_format_rejected() {
        assert!(matches!(
            TimestampFormat::new("%Q"),
            Err(LoggerError::InvalidTimestampFormat { .. })
        ));
        // Naive local times carry no offset
        assert!(TimestampFormat::new("%H:%M %z").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.threshold, Level::Debug);
        assert_eq!(config.timestamp_format, TimestampFormat::default());
        assert!(config.override_writer.is_none());
        assert!(config.active_sink().ptr_eq(&config.primary_sink));
    }

    #[test]
    fn test_active_sink_prefers_override() {
        let override_writer = SharedSink::new(Vec::<u8>::new());
        let config = LoggerConfig {
            override_writer: Some(override_writer.clone()),
            ..LoggerConfig::default()
        };
        assert!(config.active_sink().ptr_eq(&override_writer));
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: LoggerSettings = toml::from_str(
            r#"
            threshold = "WARNING"
            timestamp_format = "%H:%M:%S"
            "#,
        )
        .unwrap();
        assert_eq!(settings.threshold, Some(Level::Warning));
        assert_eq!(
            settings.timestamp_format.as_ref().map(TimestampFormat::pattern),
            Some("%H:%M:%S")
        );
    }

    #[test]
    fn test_settings_from_toml_partial() {
        let settings: LoggerSettings = toml::from_str(r#"threshold = "OFF""#).unwrap();
        assert_eq!(settings.threshold, Some(Level::Off));
        assert!(settings.timestamp_format.is_none());
    }

    #[test]
    fn test_settings_reject_invalid_format() {
        let result: Result<LoggerSettings, _> = toml::from_str(r#"timestamp_format = "%Q""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_from_env() {
        let vars: HashMap<&str, &str> = [
            (LEVEL_ENV_VAR, "info"),
            (TIMESTAMP_FORMAT_ENV_VAR, "%Y%m%d"),
        ]
        .into_iter()
        .collect();
        let settings = LoggerSettings::from_env_with(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.threshold, Some(Level::Info));
        assert_eq!(
            settings.timestamp_format,
            Some(TimestampFormat::new("%Y%m%d").unwrap())
        );
    }

    #[test]
    fn test_settings_from_env_ignores_bad_values() {
        let mut settings = None;
        let events = capture_events(|| {
            settings = Some(LoggerSettings::from_env_with(|key| match key {
                LEVEL_ENV_VAR => Some("loud".to_string()),
                TIMESTAMP_FORMAT_ENV_VAR => Some("%Q".to_string()),
                _ => None,
            }));
        });

        assert_eq!(settings, Some(LoggerSettings::default()));
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|event| event.level == tracing::Level::WARN));
        assert_eq!(
            events[0].message,
            "Ignoring SEVLOG_LEVEL: unknown log level: \"loud\""
        );
        assert_eq!(
            events[1].message,
            "Ignoring SEVLOG_TIMESTAMP_FORMAT: invalid timestamp format: \"%Q\""
        );
    }

    #[test]
    fn test_settings_from_env_quiet_when_unset() {
        let events = capture_events(|| {
            assert_eq!(LoggerSettings::from_env_with(|_| None), LoggerSettings::default());
        });
        assert!(events.is_empty());
    }
}
