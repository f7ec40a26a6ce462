//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod context;
mod dispatch;
pub mod error;
pub mod field;
pub mod field_pool;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod sweeten;
pub mod timestamp;
pub mod valuer;

pub use appender::Appender;
pub use config::{Adapter, LoggerConfig};
pub use context::Context;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue, ERROR_KEY};
pub use field_pool::{default_pool, FieldPool, PooledFields};
pub use log_entry::LogEntry;
pub use log_level::{AtomicLevel, Level};
pub use logger::{FatalHook, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sink::{AppenderSink, NopSink, Sink};
pub use sweeten::{append_sweetened, sprint, Arg};
pub use timestamp::TimestampFormat;
pub use valuer::Valuer;
