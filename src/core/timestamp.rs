//! Timestamp rendering for encoded entries

use super::error::{LoggerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an entry's timestamp is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,
    /// `2025-01-08T10:30:45+00:00`
    Rfc3339,
    /// Seconds since the epoch
    Unix,
    UnixMillis,
    UnixMicros,
    /// Any strftime pattern, e.g. `%d/%b/%Y:%H:%M:%S %z`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(pattern) => datetime.format(pattern).to_string(),
        }
    }

    /// JSON rendering: numbers for the Unix variants, strings otherwise.
    pub fn json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        use serde_json::Value;
        match self {
            TimestampFormat::Unix => Value::Number(datetime.timestamp().into()),
            TimestampFormat::UnixMillis => Value::Number(datetime.timestamp_millis().into()),
            TimestampFormat::UnixMicros => Value::Number(datetime.timestamp_micros().into()),
            _ => Value::String(self.format(datetime)),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    /// Accepts a preset name (case-insensitive) or a strftime pattern containing `%`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unixmillis" => Ok(TimestampFormat::UnixMillis),
            "unixmicros" => Ok(TimestampFormat::UnixMicros),
            _ if s.contains('%') => Ok(TimestampFormat::Custom(s.to_string())),
            _ => Err(LoggerError::config(
                "timestampFormat",
                format!("unknown preset '{}'", s),
            )),
        }
    }
}
