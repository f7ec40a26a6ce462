//! The writing engine behind a [`Logger`](super::logger::Logger)
//!
//! A [`Sink`] receives fully materialized calls: a level, a message and the
//! ordered field list. It owns static fields attached with `with`, the
//! dotted logger name, output encoding and its own synchronization.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    field::Field,
    log_entry::LogEntry,
    log_level::Level,
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub trait Sink: Send + Sync {
    /// Write one entry. `fields` is only borrowed for the duration of the call.
    fn write(&self, level: Level, message: &str, fields: &[Field]);

    /// A sink that prepends `fields` to every entry.
    fn with(&self, fields: &[Field]) -> Arc<dyn Sink>;

    /// A sink whose name gains `name` as a new dotted segment.
    fn named(&self, name: &str) -> Arc<dyn Sink>;

    /// Flush buffered output.
    fn sync(&self) -> Result<()>;

    /// Whether DPanic entries should panic.
    fn development(&self) -> bool {
        false
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

impl Sink for NopSink {
    fn write(&self, _level: Level, _message: &str, _fields: &[Field]) {}

    fn with(&self, _fields: &[Field]) -> Arc<dyn Sink> {
        Arc::new(NopSink)
    }

    fn named(&self, _name: &str) -> Arc<dyn Sink> {
        Arc::new(NopSink)
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}

/// Sink that fans entries out to a shared set of [`Appender`]s.
///
/// Sinks derived with `with` and `named` share the appenders and the
/// metrics of their parent.
#[derive(Clone)]
pub struct AppenderSink {
    appenders: Arc<Mutex<Vec<Box<dyn Appender>>>>,
    fields: Arc<[Field]>,
    name: Option<Arc<str>>,
    development: bool,
    metrics: Arc<LoggerMetrics>,
}

impl AppenderSink {
    pub fn new() -> Self {
        Self {
            appenders: Arc::new(Mutex::new(Vec::new())),
            fields: Arc::from(Vec::new()),
            name: None,
            development: false,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn with_appenders(appenders: Vec<Box<dyn Appender>>) -> Self {
        let sink = Self::new();
        *sink.appenders.lock() = appenders;
        sink
    }

    /// Make DPanic entries panic after they are written.
    #[must_use]
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Add an appender; visible to every sink sharing this one's appenders.
    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.lock().push(appender);
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.lock().len()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Hand `entry` to each appender, isolating failures and panics per
    /// appender. Returns true if any appender failed.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(payload) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(payload.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }
        has_error
    }
}

impl Default for AppenderSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppenderSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppenderSink")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .field("development", &self.development)
            .finish()
    }
}

impl Sink for AppenderSink {
    fn write(&self, level: Level, message: &str, fields: &[Field]) {
        let mut all = Vec::with_capacity(self.fields.len() + fields.len());
        all.extend_from_slice(&self.fields);
        all.extend_from_slice(fields);

        let entry = LogEntry::new(level, message)
            .with_logger(self.name())
            .with_fields(all);

        let mut appenders = self.appenders.lock();
        Self::process_sync(&mut appenders, &entry, &self.metrics);
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Sink> {
        if fields.is_empty() {
            return Arc::new(self.clone());
        }
        let mut merged = Vec::with_capacity(self.fields.len() + fields.len());
        merged.extend_from_slice(&self.fields);
        merged.extend_from_slice(fields);
        Arc::new(Self {
            fields: Arc::from(merged),
            ..self.clone()
        })
    }

    fn named(&self, name: &str) -> Arc<dyn Sink> {
        if name.is_empty() {
            return Arc::new(self.clone());
        }
        let name: Arc<str> = match self.name {
            Some(ref parent) => Arc::from(format!("{}.{}", parent, name)),
            None => Arc::from(name),
        };
        Arc::new(Self {
            name: Some(name),
            ..self.clone()
        })
    }

    fn sync(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        let mut first_error: Option<LoggerError> = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} flush failed: {}", idx, e);
                    self.metrics.record_flush_failure();
                    first_error.get_or_insert(e);
                }
                Err(payload) => {
                    let msg = panic_message(payload.as_ref());
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked during flush: {}. \
                         Other appenders continue to function.",
                        idx, msg
                    );
                    self.metrics.record_flush_failure();
                    first_error.get_or_insert(LoggerError::writer(msg));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn development(&self) -> bool {
        self.development
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
