//! Log entry handed to appenders

use super::field::Field;
use super::log_level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Dotted logger name, if the sink was named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    /// Sink fields, then valuer fields, then call-site fields. May contain
    /// duplicate keys; see [`LogEntry::resolved_fields`].
    pub fields: Vec<Field>,
}

impl LogEntry {
    /// Escape newlines, carriage returns and tabs so one entry stays one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, message: &str) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message),
            timestamp: Utc::now(),
            logger: None,
            thread_id: current_thread_id(),
            thread_name: current_thread_name(),
            fields: Vec::new(),
        }
    }

    pub fn with_logger(mut self, name: Option<&str>) -> Self {
        self.logger = name.map(String::from);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Fields with duplicate keys collapsed: each key keeps the position of
    /// its first occurrence and the value of its last.
    pub fn resolved_fields(&self) -> Vec<&Field> {
        let mut out: Vec<&Field> = Vec::with_capacity(self.fields.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(self.fields.len());
        for field in &self.fields {
            match index.get(field.key.as_str()) {
                Some(&i) => out[i] = field,
                None => {
                    index.insert(field.key.as_str(), out.len());
                    out.push(field);
                }
            }
        }
        out
    }

    /// Value of the last field named `key`.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().rev().find(|f| f.key == key)
    }
}
