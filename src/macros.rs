//! Logging macros for ergonomic log message formatting.
//!
//! The level macros are the template style with `println!`-like syntax,
//! using the logger's bound context. `args!` and `kv!` build the argument
//! slices taken by the print and key/value styles.
//!
//! # Examples
//!
//! ```
//! use rust_valuer_logger::prelude::*;
//! use rust_valuer_logger::{args, info, kv};
//!
//! let logger = Logger::builder().appender(MemoryAppender::new()).build();
//!
//! info!(logger, "Server listening on port {}", 8080);
//! logger.info(args!["user ", 42, " logged in"]);
//! logger.infow("request served", kv!["path", "/health", "status", 200]);
//! ```

/// Log a template-style message at `$level`.
///
/// # Examples
///
/// ```
/// # use rust_valuer_logger::prelude::*;
/// # let logger = Logger::nop();
/// use rust_valuer_logger::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        logger.logf(logger.context(), $level, format_args!($($arg)+))
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_valuer_logger::prelude::*;
/// # let logger = Logger::nop();
/// use rust_valuer_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log at DPanic; panics afterwards when the logger is in development mode.
#[macro_export]
macro_rules! dpanic {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DPanic, $($arg)+)
    };
}

/// Log a fatal-level message, then run the logger's fatal hook.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// Build a `&[FieldValue]` for the print style.
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        &[$($crate::FieldValue::from($value)),*]
    };
}

/// Build a `&[Arg]` for the key/value style.
///
/// ```
/// # use rust_valuer_logger::prelude::*;
/// use rust_valuer_logger::kv;
/// let port = Field::int("port", 8080);
/// let args = kv![port, "region", "eu"];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! kv {
    ($($value:expr),* $(,)?) => {
        &[$($crate::Arg::from($value)),*]
    };
}
