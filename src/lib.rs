//! # Rust Valuer Logger
//!
//! A structured-logging facade with lazily evaluated, context-derived
//! fields and a shared atomic level gate.
//!
//! ## Features
//!
//! - **Valuer chains**: per-call fields computed from a request [`Context`]
//! - **Pooled buffers**: valuer fields are materialized into reused buffers
//! - **Four call styles**: print, template, key/value and typed fields,
//!   each with a bound-context and an explicit-context form
//! - **Dynamic levels**: one [`AtomicLevel`] can drive many loggers
//! - **Global default**: a swappable process-wide logger in [`global`]
//!
//! ## Quick start
//!
//! ```
//! use rust_valuer_logger::prelude::*;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .appender(memory.clone())
//!     .valuers([Valuer::trace_id(|ctx| {
//!         ctx.named("traceId").map(|v| v.to_string()).unwrap_or_default()
//!     })])
//!     .build();
//!
//! let ctx = Context::background().with_named("traceId", "abc123");
//! logger.infox_context(&ctx, "started", &[Field::int("port", 8080)]);
//!
//! assert_eq!(
//!     memory.last_fields(),
//!     vec![Field::string("traceId", "abc123"), Field::int("port", 8080)]
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, AppenderSink, Arg, AtomicLevel, Context, FatalHook, Field, FieldPool,
        FieldValue, Level, LogEntry, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, NopSink, OutputFormat, Result, Sink, TimestampFormat, Valuer,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    Adapter, Appender, AppenderSink, Arg, AtomicLevel, Context, FatalHook, Field, FieldPool,
    FieldValue, Level, LogEntry, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    NopSink, OutputFormat, Result, Sink, TimestampFormat, Valuer,
};
