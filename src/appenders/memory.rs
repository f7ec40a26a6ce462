//! In-memory appender for inspecting what a logger wrote

use crate::core::{Appender, Field, Level, LogEntry, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Captures entries in a shared buffer.
///
/// Clones share the buffer, so keep one clone for assertions and hand the
/// other to the logger.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.lock().last().cloned()
    }

    /// Fields of the last entry, in write order
    pub fn last_fields(&self) -> Vec<Field> {
        self.entries
            .lock()
            .last()
            .map(|e| e.fields.clone())
            .unwrap_or_default()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.entries.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
