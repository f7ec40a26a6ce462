//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A destination for encoded entries.
///
/// Appenders are driven by [`AppenderSink`](super::sink::AppenderSink),
/// which serializes calls behind a lock, so `append` takes `&mut self`.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
