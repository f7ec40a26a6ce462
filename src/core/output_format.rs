//! Encodings for log entries
//!
//! All encodings write fields after resolving duplicate keys, so the last
//! value attached under a key is the one that appears. In the JSON and logfmt
//! encodings a field whose key matches one of the entry's own keys is written
//! as `fields.<key>`.

use super::error::{LoggerError, Result};
use super::field::FieldValue;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// `[2025-01-08T10:30:45.123Z] [INFO ] main - http: started port=8080`
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// `timestamp=... level=INFO message="started" port=8080`
    Logfmt,
}

impl OutputFormat {
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => self.format_text(entry, timestamp_format),
            OutputFormat::Json => self.format_json(entry, timestamp_format),
            OutputFormat::Logfmt => self.format_logfmt(entry, timestamp_format),
        }
    }

    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let thread = entry.thread_name.as_ref().unwrap_or(&entry.thread_id);
        let mut line = format!(
            "[{}] [{:5}] {} - ",
            timestamp_format.format(&entry.timestamp),
            entry.level.to_str(),
            thread
        );
        if let Some(ref name) = entry.logger {
            let _ = write!(line, "{}: ", name);
        }
        line.push_str(&entry.message);
        for field in entry.resolved_fields() {
            let _ = write!(line, " {}", field);
        }
        line
    }

    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        use serde_json::Value;

        let mut obj = serde_json::Map::new();
        obj.insert(
            "timestamp".to_string(),
            timestamp_format.json_value(&entry.timestamp),
        );
        obj.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        if let Some(ref name) = entry.logger {
            obj.insert("logger".to_string(), Value::String(name.clone()));
        }
        obj.insert("message".to_string(), Value::String(entry.message.clone()));
        obj.insert(
            "thread_id".to_string(),
            Value::String(entry.thread_id.clone()),
        );
        if let Some(ref name) = entry.thread_name {
            obj.insert("thread_name".to_string(), Value::String(name.clone()));
        }
        for field in entry.resolved_fields() {
            obj.insert(field_key(&field.key).into_owned(), field.value.to_json_value());
        }

        serde_json::to_string(&Value::Object(obj)).unwrap_or_default()
    }

    fn format_logfmt(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = Vec::with_capacity(5 + entry.fields.len());

        parts.push(format!(
            "timestamp={}",
            escape_logfmt_value(&timestamp_format.format(&entry.timestamp))
        ));
        parts.push(format!("level={}", entry.level.to_str()));
        if let Some(ref name) = entry.logger {
            parts.push(format!("logger={}", escape_logfmt_value(name)));
        }
        // message is always quoted
        parts.push(format!("message={}", quote_logfmt_value(&entry.message)));
        parts.push(format!("thread_id={}", escape_logfmt_value(&entry.thread_id)));

        for field in entry.resolved_fields() {
            let value = match &field.value {
                FieldValue::String(s) | FieldValue::Error(s) => quote_logfmt_value(s),
                FieldValue::Object(_) | FieldValue::Array(_) | FieldValue::Json(_) => {
                    quote_logfmt_value(&field.value.to_json_value().to_string())
                }
                other => escape_logfmt_value(&other.to_string()),
            };
            parts.push(format!("{}={}", escape_logfmt_key(&field_key(&field.key)), value));
        }

        parts.join(" ")
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "text" | "console" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::Logfmt),
            _ => Err(LoggerError::config("format", format!("unknown format '{}'", s))),
        }
    }
}

/// Keys every structured entry carries on its own
const ENTRY_KEYS: [&str; 6] = [
    "timestamp",
    "level",
    "logger",
    "message",
    "thread_id",
    "thread_name",
];

fn field_key(key: &str) -> Cow<'_, str> {
    if ENTRY_KEYS.contains(&key) {
        Cow::Owned(format!("fields.{}", key))
    } else {
        Cow::Borrowed(key)
    }
}

fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

fn escape_logfmt_value(value: &str) -> String {
    if value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, Level};

    fn entry() -> LogEntry {
        LogEntry::new(Level::Info, "started")
            .with_logger(Some("http"))
            .with_fields(vec![
                Field::string("traceId", "abc123"),
                Field::int("port", 8080),
            ])
    }

    #[test]
    fn test_text_format() {
        let line = OutputFormat::Text.format(&entry(), &TimestampFormat::Iso8601);
        assert!(line.contains("[INFO ]"));
        assert!(line.ends_with("http: started traceId=abc123 port=8080"));
    }

    #[test]
    fn test_json_format_keeps_field_order() {
        let line = OutputFormat::Json.format(&entry(), &TimestampFormat::Iso8601);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["logger"], "http");
        assert_eq!(parsed["traceId"], "abc123");
        assert_eq!(parsed["port"], 8080);
        assert!(line.find("traceId").unwrap() < line.find("port").unwrap());
    }

    #[test]
    fn test_json_duplicate_key_last_wins() {
        let e = LogEntry::new(Level::Warn, "m").with_fields(vec![
            Field::string("user", "a"),
            Field::string("user", "b"),
        ]);
        let parsed: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.format(&e, &TimestampFormat::Unix)).unwrap();
        assert_eq!(parsed["user"], "b");
        assert!(parsed["timestamp"].is_number());
    }

    #[test]
    fn test_logfmt_format() {
        let e = LogEntry::new(Level::Warn, "query done").with_fields(vec![
            Field::string("query", "SELECT * FROM users WHERE id=1"),
            Field::bool("cached", false),
        ]);
        let line = OutputFormat::Logfmt.format(&e, &TimestampFormat::Iso8601);
        assert!(line.contains("level=WARN"));
        assert!(line.contains("message=\"query done\""));
        assert!(line.contains("query=\"SELECT * FROM users WHERE id=1\""));
        assert!(line.contains("cached=false"));
    }

    fn spoofing_entry() -> LogEntry {
        LogEntry::new(Level::Info, "started").with_fields(vec![
            Field::string("message", "spoof"),
            Field::string("level", "DEBUG"),
            Field::int("port", 8080),
        ])
    }

    #[test]
    fn test_json_fields_cannot_replace_entry_keys() {
        let line = OutputFormat::Json.format(&spoofing_entry(), &TimestampFormat::Iso8601);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "started");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["fields.message"], "spoof");
        assert_eq!(parsed["fields.level"], "DEBUG");
        assert_eq!(parsed["port"], 8080);
    }

    #[test]
    fn test_logfmt_fields_cannot_repeat_entry_keys() {
        let line = OutputFormat::Logfmt.format(&spoofing_entry(), &TimestampFormat::Iso8601);
        assert_eq!(line.matches(" message=").count(), 1);
        assert_eq!(line.matches(" level=").count(), 1);
        assert!(line.contains("message=\"started\""));
        assert!(line.contains("fields.message=\"spoof\""));
        assert!(line.contains("fields.level=\"DEBUG\""));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("console".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
