//! Process-wide default logger
//!
//! The default starts as [`Logger::nop`] and is swapped atomically with
//! [`replace_globals`]. Every free function here reads a snapshot of the
//! current default, so a concurrent replacement never tears a call.
//!
//! ```
//! use rust_valuer_logger::{global, Logger, Level};
//! use rust_valuer_logger::appenders::MemoryAppender;
//!
//! let memory = MemoryAppender::new();
//! let previous = global::replace_globals(
//!     Logger::builder().min_level(Level::Debug).appender(memory.clone()).build(),
//! );
//! global::infox("from anywhere", &[]);
//! global::replace_globals((*previous).clone());
//! assert_eq!(memory.len(), 1);
//! ```

use crate::core::{
    Arg, AtomicLevel, Context, Field, FieldValue, Level, Logger, Result, Sink, Valuer,
};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<ArcSwap<Logger>> = OnceLock::new();

fn cell() -> &'static ArcSwap<Logger> {
    GLOBAL.get_or_init(|| ArcSwap::from_pointee(Logger::nop()))
}

/// Install `logger` as the default and return the one it replaced.
pub fn replace_globals(logger: Logger) -> Arc<Logger> {
    cell().swap(Arc::new(logger))
}

/// Snapshot of the current default.
pub fn global() -> Arc<Logger> {
    cell().load_full()
}

/// Append `valuers` to the default logger's chain.
pub fn set_default_valuer(valuers: impl IntoIterator<Item = Valuer>) {
    let valuers: Vec<Valuer> = valuers.into_iter().collect();
    cell().rcu(|current| {
        let mut next = Logger::clone(current);
        next.set_default_valuer(valuers.iter().cloned());
        next
    });
}

// ---- level control ----

pub fn set_level(level: Level) {
    global().set_level(level);
}

pub fn set_level_text(text: &str) -> Result<()> {
    global().set_level_text(text)
}

pub fn level() -> Level {
    global().level()
}

pub fn enabled(level: Level) -> bool {
    global().enabled(level)
}

pub fn v(level: i8) -> bool {
    global().v(level)
}

pub fn level_gate() -> AtomicLevel {
    global().level_gate().clone()
}

// ---- derivation ----

pub fn with_valuer(valuers: impl IntoIterator<Item = Valuer>) -> Logger {
    global().with_valuer(valuers)
}

pub fn with_new_valuer(valuers: impl IntoIterator<Item = Valuer>) -> Logger {
    global().with_new_valuer(valuers)
}

pub fn with_context(ctx: Context) -> Logger {
    global().with_context(ctx)
}

pub fn with(fields: &[Field]) -> Logger {
    global().with(fields)
}

pub fn named(name: &str) -> Logger {
    global().named(name)
}

pub fn with_level_gate(level: AtomicLevel) -> Logger {
    global().with_level_gate(level)
}

pub fn with_independent_level() -> Logger {
    global().with_independent_level()
}

pub fn sink() -> Arc<dyn Sink> {
    Arc::clone(global().sink())
}

pub fn sync() -> Result<()> {
    global().sync()
}

// ---- generic entry points ----

pub fn log(ctx: &Context, level: Level, args: &[FieldValue]) {
    global().log(ctx, level, args);
}

pub fn logf(ctx: &Context, level: Level, args: fmt::Arguments<'_>) {
    global().logf(ctx, level, args);
}

pub fn logw(ctx: &Context, level: Level, message: &str, args: &[Arg<'_>]) {
    global().logw(ctx, level, message, args);
}

pub fn logx(ctx: &Context, level: Level, message: &str, fields: &[Field]) {
    global().logx(ctx, level, message, fields);
}

macro_rules! global_level_fns {
    ($(
        $print:ident, $print_ctx:ident,
        $fmt:ident, $fmt_ctx:ident,
        $kv:ident, $kv_ctx:ident,
        $typed:ident, $typed_ctx:ident;
    )*) => {
        $(
            pub fn $print(args: &[FieldValue]) {
                global().$print(args);
            }

            pub fn $print_ctx(ctx: &Context, args: &[FieldValue]) {
                global().$print_ctx(ctx, args);
            }

            pub fn $fmt(args: fmt::Arguments<'_>) {
                global().$fmt(args);
            }

            pub fn $fmt_ctx(ctx: &Context, args: fmt::Arguments<'_>) {
                global().$fmt_ctx(ctx, args);
            }

            pub fn $kv(message: &str, args: &[Arg<'_>]) {
                global().$kv(message, args);
            }

            pub fn $kv_ctx(ctx: &Context, message: &str, args: &[Arg<'_>]) {
                global().$kv_ctx(ctx, message, args);
            }

            pub fn $typed(message: &str, fields: &[Field]) {
                global().$typed(message, fields);
            }

            pub fn $typed_ctx(ctx: &Context, message: &str, fields: &[Field]) {
                global().$typed_ctx(ctx, message, fields);
            }
        )*
    };
}

global_level_fns! {
    debug, debug_context, debugf, debugf_context, debugw, debugw_context, debugx, debugx_context;
    info, info_context, infof, infof_context, infow, infow_context, infox, infox_context;
    warn, warn_context, warnf, warnf_context, warnw, warnw_context, warnx, warnx_context;
    error, error_context, errorf, errorf_context, errorw, errorw_context, errorx, errorx_context;
    dpanic, dpanic_context, dpanicf, dpanicf_context, dpanicw, dpanicw_context, dpanicx, dpanicx_context;
    panic, panic_context, panicf, panicf_context, panicw, panicw_context, panicx, panicx_context;
    fatal, fatal_context, fatalf, fatalf_context, fatalw, fatalw_context, fatalx, fatalx_context;
}
