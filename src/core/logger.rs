//! Logger handle, derivation and pooled field materialization

use super::{
    appender::Appender,
    context::Context,
    error::Result,
    field::{Field, FieldValue},
    field_pool::{default_pool, FieldPool},
    log_level::{AtomicLevel, Level},
    sink::{AppenderSink, NopSink, Sink},
    sweeten::{append_sweetened, sprint, Arg},
    valuer::Valuer,
};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// What a Fatal entry does once it has been written and the sink synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalHook {
    /// `std::process::exit` with this status
    Exit(i32),
    /// Unwind with the message, for tests and embedders
    Panic,
}

impl Default for FatalHook {
    fn default() -> Self {
        FatalHook::Exit(1)
    }
}

impl FatalHook {
    fn run(self, message: &str) -> ! {
        match self {
            FatalHook::Exit(code) => std::process::exit(code),
            FatalHook::Panic => panic!("{}", message),
        }
    }
}

/// A cheap, clonable logging handle.
///
/// A `Logger` bundles a [`Sink`], a shared [`AtomicLevel`], an ordered chain
/// of [`Valuer`]s and a bound [`Context`]. Every derivation returns a new
/// handle and leaves the receiver untouched, except
/// [`set_default_valuer`](Logger::set_default_valuer).
///
/// Call styles, each with a bound-context and an `_context` form:
///
/// - `info(&[..])`: print-style over loose values
/// - `infof(format_args!(..))`: template-style
/// - `infow(msg, &[..])`: loose key/value pairs, reconciled into fields
/// - `infox(msg, &[..])`: typed fields, no reconciliation
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
    level: AtomicLevel,
    valuers: Arc<[Valuer]>,
    ctx: Context,
    pool: Arc<FieldPool>,
    fatal_hook: FatalHook,
    stack: bool,
}

impl Logger {
    /// Wrap `sink` with the given level gate, no valuers and a background context.
    pub fn new_with(sink: Arc<dyn Sink>, level: AtomicLevel) -> Self {
        Self {
            sink,
            level,
            valuers: Arc::from(Vec::new()),
            ctx: Context::background(),
            pool: default_pool(),
            fatal_hook: FatalHook::default(),
            stack: false,
        }
    }

    /// A logger that writes nothing.
    pub fn nop() -> Self {
        Self::new_with(Arc::new(NopSink), AtomicLevel::new())
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ---- level control ----

    /// Change the minimum level on the shared gate.
    pub fn set_level(&self, level: Level) -> &Self {
        self.level.set_level(level);
        self
    }

    pub fn set_level_text(&self, text: &str) -> Result<()> {
        self.level.set_level_text(text)
    }

    pub fn level(&self) -> Level {
        self.level.level()
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    /// Numeric form of [`Logger::enabled`].
    pub fn v(&self, level: i8) -> bool {
        level >= self.level.level().as_i8()
    }

    pub fn level_gate(&self) -> &AtomicLevel {
        &self.level
    }

    /// Same logger, driven by another gate.
    #[must_use]
    pub fn with_level_gate(&self, level: AtomicLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    /// Same logger with its own copy of the gate; later `set_level` calls on
    /// either side no longer affect the other.
    #[must_use]
    pub fn with_independent_level(&self) -> Self {
        self.with_level_gate(self.level.detached())
    }

    // ---- derivation ----

    /// Append `valuers` to a copy of the chain.
    #[must_use]
    pub fn with_valuer(&self, valuers: impl IntoIterator<Item = Valuer>) -> Self {
        Self {
            valuers: self.extended_chain(valuers),
            ..self.clone()
        }
    }

    /// Replace the chain with `valuers` only.
    #[must_use]
    pub fn with_new_valuer(&self, valuers: impl IntoIterator<Item = Valuer>) -> Self {
        Self {
            valuers: valuers.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Append `valuers` to this logger's own chain.
    ///
    /// Meant for one-time setup. Clones taken earlier keep their chain.
    pub fn set_default_valuer(&mut self, valuers: impl IntoIterator<Item = Valuer>) -> &mut Self {
        self.valuers = self.extended_chain(valuers);
        self
    }

    #[must_use]
    pub fn with_context(&self, ctx: Context) -> Self {
        Self {
            ctx,
            ..self.clone()
        }
    }

    /// Attach static fields to the sink. They are evaluated once, here.
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        Self {
            sink: self.sink.with(fields),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        Self {
            sink: self.sink.named(name),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_fatal_hook(&self, hook: FatalHook) -> Self {
        Self {
            fatal_hook: hook,
            ..self.clone()
        }
    }

    /// Attach a `stacktrace` field to DPanic, Panic and Fatal entries.
    #[must_use]
    pub fn with_stack(&self, stack: bool) -> Self {
        Self {
            stack,
            ..self.clone()
        }
    }

    fn extended_chain(&self, valuers: impl IntoIterator<Item = Valuer>) -> Arc<[Valuer]> {
        let extra = valuers.into_iter();
        let mut chain = Vec::with_capacity(self.valuers.len() + extra.size_hint().0);
        chain.extend(self.valuers.iter().cloned());
        chain.extend(extra);
        Arc::from(chain)
    }

    // ---- accessors ----

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn valuers(&self) -> &[Valuer] {
        &self.valuers
    }

    pub fn field_pool(&self) -> &Arc<FieldPool> {
        &self.pool
    }

    /// Flush the sink.
    pub fn sync(&self) -> Result<()> {
        self.sink.sync()
    }

    // ---- generic entry points ----

    /// Print-style: the message is built from `args`, see [`sprint`].
    pub fn log(&self, ctx: &Context, level: Level, args: &[FieldValue]) {
        if !self.level.enabled(level) {
            return;
        }
        let message = sprint(args);
        self.write_fields(ctx, level, &message, &[]);
    }

    /// Template-style. Literal templates without arguments are not copied.
    pub fn logf(&self, ctx: &Context, level: Level, args: fmt::Arguments<'_>) {
        if !self.level.enabled(level) {
            return;
        }
        let message: Cow<'_, str> = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };
        self.write_fields(ctx, level, &message, &[]);
    }

    /// Loosely-typed key/value style.
    ///
    /// Malformed arguments are reported as separate Error entries through
    /// this logger and never fail the call. Each report is a full entry, so
    /// the valuer chain runs once for it as well.
    pub fn logw(&self, ctx: &Context, level: Level, message: &str, args: &[Arg<'_>]) {
        if !self.level.enabled(level) {
            return;
        }
        let report = |diagnostic: &'static str, field: Field| {
            self.logx(ctx, Level::Error, diagnostic, &[field]);
        };
        if self.valuers.is_empty() && !self.wants_stack(level) {
            if args.is_empty() {
                self.sink.write(level, message, &[]);
            } else {
                let mut fields = Vec::with_capacity(args.len());
                append_sweetened(&mut fields, args, report);
                self.sink.write(level, message, &fields);
            }
        } else {
            let mut buf = self.pool.get();
            buf.extend(self.valuers.iter().map(|v| v.call(ctx)));
            append_sweetened(&mut buf, args, report);
            self.push_stack(level, &mut buf);
            self.sink.write(level, message, &buf);
        }
        self.terminate(level, message);
    }

    /// Typed-field style: fields are passed through without reconciliation.
    pub fn logx(&self, ctx: &Context, level: Level, message: &str, fields: &[Field]) {
        if !self.level.enabled(level) {
            return;
        }
        self.write_fields(ctx, level, message, fields);
    }

    /// Valuer fields in chain order, then `fields`, then the terminal
    /// action for DPanic/Panic/Fatal. The pooled buffer is released before
    /// the terminal action runs.
    fn write_fields(&self, ctx: &Context, level: Level, message: &str, fields: &[Field]) {
        if self.valuers.is_empty() && !self.wants_stack(level) {
            self.sink.write(level, message, fields);
        } else {
            let mut buf = self.pool.get();
            buf.extend(self.valuers.iter().map(|v| v.call(ctx)));
            buf.extend_from_slice(fields);
            self.push_stack(level, &mut buf);
            self.sink.write(level, message, &buf);
        }
        self.terminate(level, message);
    }

    #[inline]
    fn wants_stack(&self, level: Level) -> bool {
        self.stack && level >= Level::DPanic
    }

    fn push_stack(&self, level: Level, buf: &mut Vec<Field>) {
        if self.wants_stack(level) {
            buf.push(Field::string(
                "stacktrace",
                Backtrace::force_capture().to_string(),
            ));
        }
    }

    #[inline]
    fn terminate(&self, level: Level, message: &str) {
        if level.is_terminal() {
            self.terminate_slow(level, message);
        }
    }

    #[cold]
    fn terminate_slow(&self, level: Level, message: &str) {
        match level {
            Level::DPanic if self.sink.development() => panic!("{}", message),
            Level::Panic => panic!("{}", message),
            Level::Fatal => {
                if let Err(e) = self.sink.sync() {
                    eprintln!("[LOGGER ERROR] Failed to sync before exit: {}", e);
                }
                self.fatal_hook.run(message)
            }
            _ => {}
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::nop()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level.level())
            .field("valuers", &self.valuers.len())
            .field("ctx", &self.ctx)
            .field("fatal_hook", &self.fatal_hook)
            .field("stack", &self.stack)
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_valuer_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(Level::Debug)
///     .appender(MemoryAppender::new())
///     .name("api")
///     .valuers([Valuer::app("billing")])
///     .build();
///
/// logger.infox("ready", &[Field::int("port", 8080)]);
/// ```
pub struct LoggerBuilder {
    level: AtomicLevel,
    appenders: Vec<Box<dyn Appender>>,
    sink: Option<Arc<dyn Sink>>,
    development: bool,
    name: Option<String>,
    fields: Vec<Field>,
    valuers: Vec<Valuer>,
    pool: Option<Arc<FieldPool>>,
    fatal_hook: FatalHook,
    ctx: Context,
    stack: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: AtomicLevel::new(),
            appenders: Vec::new(),
            sink: None,
            development: false,
            name: None,
            fields: Vec::new(),
            valuers: Vec::new(),
            pool: None,
            fatal_hook: FatalHook::default(),
            ctx: Context::background(),
            stack: false,
        }
    }

    /// Set minimum log level on a fresh gate
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.level = AtomicLevel::new_at(level);
        self
    }

    /// Share an existing gate
    #[must_use = "builder methods return a new value"]
    pub fn level_gate(mut self, level: AtomicLevel) -> Self {
        self.level = level;
        self
    }

    /// Add an appender to the built-in sink. Ignored when [`sink`](Self::sink) is set.
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Use a custom sink instead of the appender-backed one.
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// DPanic entries panic in development mode.
    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Static fields baked into the sink
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn valuers(mut self, valuers: impl IntoIterator<Item = Valuer>) -> Self {
        self.valuers.extend(valuers);
        self
    }

    /// Use a dedicated buffer pool instead of the process-wide one.
    #[must_use = "builder methods return a new value"]
    pub fn field_pool(mut self, pool: Arc<FieldPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_hook(mut self, hook: FatalHook) -> Self {
        self.fatal_hook = hook;
        self
    }

    /// Attach a `stacktrace` field to DPanic, Panic and Fatal entries
    #[must_use = "builder methods return a new value"]
    pub fn stack(mut self, stack: bool) -> Self {
        self.stack = stack;
        self
    }

    /// Context used by the bound-context call forms
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn build(self) -> Logger {
        let mut sink: Arc<dyn Sink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(
                AppenderSink::with_appenders(self.appenders).with_development(self.development),
            ),
        };
        if !self.fields.is_empty() {
            sink = sink.with(&self.fields);
        }
        if let Some(ref name) = self.name {
            sink = sink.named(name);
        }

        Logger {
            sink,
            level: self.level,
            valuers: Arc::from(self.valuers),
            ctx: self.ctx,
            pool: self.pool.unwrap_or_else(default_pool),
            fatal_hook: self.fatal_hook,
            stack: self.stack,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn capture(level: Level) -> (Logger, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .min_level(level)
            .appender(memory.clone())
            .field_pool(Arc::new(FieldPool::new(8)))
            .build();
        (logger, memory)
    }

    fn counting_valuer(counter: &Arc<AtomicUsize>) -> Valuer {
        let counter = Arc::clone(counter);
        Valuer::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Field::bool("counted", true)
        })
    }

    #[test]
    fn test_disabled_level_skips_valuers_and_sink() {
        let (logger, memory) = capture(Level::Warn);
        let counter = Arc::new(AtomicUsize::new(0));
        let logger = logger.with_valuer([counting_valuer(&counter)]);
        let ctx = Context::background();

        logger.log(&ctx, Level::Info, &["x".into()]);
        logger.logf(&ctx, Level::Debug, format_args!("{}", 1));
        logger.logw(&ctx, Level::Info, "x", &[Arg::from("k"), Arg::from("v")]);
        logger.logx(&ctx, Level::Info, "x", &[]);

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(memory.is_empty());
        assert_eq!(logger.field_pool().allocated(), 0);
    }

    #[test]
    fn test_valuer_fields_precede_call_fields() {
        let (logger, memory) = capture(Level::Debug);
        let logger = logger.with_valuer([
            Valuer::immut_string("a", "1"),
            Valuer::immut_string("b", "2"),
        ]);

        logger.logx(
            logger.context(),
            Level::Info,
            "m",
            &[Field::int("c", 3), Field::int("d", 4)],
        );

        let keys: Vec<String> = memory.last_fields().into_iter().map(|f| f.key).collect();
        assert_eq!(keys, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_with_valuer_leaves_parent_untouched() {
        let (parent, memory) = capture(Level::Debug);
        let child = parent.with_valuer([Valuer::immut_int("x", 1)]);
        let ctx = Context::background();

        parent.logx(&ctx, Level::Info, "parent", &[]);
        child.logx(&ctx, Level::Info, "child", &[]);

        let entries = memory.entries();
        assert!(entries[0].fields.is_empty());
        assert_eq!(entries[1].fields, vec![Field::int("x", 1)]);
        assert!(parent.valuers().is_empty());
    }

    #[test]
    fn test_sibling_derivations_are_independent() {
        let (root, _) = capture(Level::Debug);
        let base = root.with_valuer([Valuer::immut_int("base", 0)]);
        let left = base.with_valuer([Valuer::immut_int("left", 1)]);
        let right = base.with_valuer([Valuer::immut_int("right", 2)]);

        assert_eq!(base.valuers().len(), 1);
        assert_eq!(left.valuers().len(), 2);
        assert_eq!(right.valuers().len(), 2);
        let ctx = Context::background();
        assert_eq!(left.valuers()[1].call(&ctx).key, "left");
        assert_eq!(right.valuers()[1].call(&ctx).key, "right");
    }

    #[test]
    fn test_with_new_valuer_replaces_chain() {
        let (logger, memory) = capture(Level::Debug);
        let logger = logger.with_valuer([Valuer::immut_int("old", 1)]);
        let fresh = logger.with_new_valuer([Valuer::immut_int("new", 2)]);

        fresh.logx(fresh.context(), Level::Info, "m", &[]);
        assert_eq!(memory.last_fields(), vec![Field::int("new", 2)]);
        assert_eq!(logger.valuers().len(), 1);
    }

    #[test]
    fn test_set_default_valuer_mutates_receiver_only() {
        let (mut logger, _) = capture(Level::Debug);
        let earlier = logger.clone();
        logger
            .set_default_valuer([Valuer::app("api")])
            .set_default_valuer([Valuer::unit("u1")]);

        assert_eq!(logger.valuers().len(), 2);
        assert!(earlier.valuers().is_empty());
    }

    #[test]
    fn test_with_context_does_not_evaluate_valuers() {
        let (logger, memory) = capture(Level::Debug);
        let counter = Arc::new(AtomicUsize::new(0));
        let logger = logger.with_valuer([counting_valuer(&counter)]);

        let scoped = logger.with_context(Context::background().with_named("traceId", "t"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        scoped.infox("m", &[]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_level_gate_shared_between_derived() {
        let (logger, memory) = capture(Level::Info);
        let child = logger.named("child");
        let independent = logger.with_independent_level();

        logger.set_level(Level::Error);
        child.warnx("hidden", &[]);
        independent.warnx("shown", &[]);

        assert_eq!(memory.messages(), vec!["shown".to_string()]);
        assert_eq!(child.level(), Level::Error);
        assert_eq!(independent.level(), Level::Info);
    }

    #[test]
    fn test_v_matches_enabled() {
        let (logger, _) = capture(Level::Warn);
        assert!(!logger.v(0));
        assert!(logger.v(1));
        assert!(logger.v(5));
        assert!(logger.set_level_text("nope").is_err());
        assert_eq!(logger.level(), Level::Warn);
    }

    #[test]
    fn test_logf_literal_and_formatted() {
        let (logger, memory) = capture(Level::Debug);
        let ctx = Context::background();
        logger.logf(&ctx, Level::Info, format_args!("plain"));
        logger.logf(&ctx, Level::Info, format_args!("port {}", 8080));
        assert_eq!(memory.messages(), vec!["plain".to_string(), "port 8080".to_string()]);
    }

    #[test]
    fn test_logw_keeps_valuer_fields_without_args() {
        let (logger, memory) = capture(Level::Debug);
        let logger = logger.with_valuer([Valuer::app("api")]);
        logger.infow("no pairs", &[]);
        assert_eq!(memory.last_fields(), vec![Field::string("app", "api")]);
    }

    #[test]
    fn test_logw_reports_diagnostics_first() {
        let (logger, memory) = capture(Level::Debug);
        logger.infow("main", &[Arg::from("k"), Arg::from("v"), Arg::from("orphan")]);

        let entries = memory.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::Error);
        assert_eq!(entries[0].message, crate::core::sweeten::IGNORED_KEY_MSG);
        assert_eq!(entries[1].message, "main");
        assert_eq!(entries[1].fields, vec![Field::any("k", "v")]);
    }

    #[test]
    fn test_logw_empty_chain_skips_pool() {
        let (logger, memory) = capture(Level::Debug);
        logger.infow("m", &[Arg::from("k"), Arg::from("v")]);
        logger.infow("m", &[Arg::from("orphan")]);

        assert_eq!(logger.field_pool().allocated(), 0);
        let entries = memory.entries();
        assert_eq!(entries[0].fields, vec![Field::any("k", "v")]);
        assert_eq!(entries[1].message, crate::core::sweeten::IGNORED_KEY_MSG);
        assert!(entries[2].fields.is_empty());
    }

    #[test]
    fn test_diagnostics_run_valuers_per_entry() {
        let (logger, memory) = capture(Level::Debug);
        let counter = Arc::new(AtomicUsize::new(0));
        let logger = logger.with_valuer([counting_valuer(&counter)]);

        logger.infow("m", &[Arg::from(1), Arg::from("v"), Arg::from("orphan")]);

        assert_eq!(memory.len(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        for entry in memory.entries() {
            assert_eq!(entry.fields[0], Field::bool("counted", true));
        }
    }

    #[test]
    fn test_stack_attached_from_dpanic_up() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .appender(memory.clone())
            .field_pool(Arc::new(FieldPool::new(2)))
            .stack(true)
            .build();

        logger.errorx("plain", &[Field::int("n", 1)]);
        logger.dpanicw("odd", &[Arg::from("k"), Arg::from("v")]);
        logger.dpanicx("odd again", &[]);

        let entries = memory.entries();
        assert!(entries[0].field("stacktrace").is_none());
        let keys: Vec<&str> = entries[1].fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["k", "stacktrace"]);
        assert!(entries[2].field("stacktrace").is_some());
        assert_eq!(logger.field_pool().idle(), 1);

        logger.with_stack(false).dpanicx("bare", &[]);
        assert!(memory.last_fields().is_empty());
    }

    #[test]
    fn test_panic_after_write() {
        let (logger, memory) = capture(Level::Debug);
        let logger = logger.with_valuer([Valuer::app("api")]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panicx("giving up", &[]);
        }));

        assert!(result.is_err());
        assert_eq!(memory.messages(), vec!["giving up".to_string()]);
        assert_eq!(logger.field_pool().idle(), 1);
    }

    #[test]
    fn test_dpanic_only_in_development() {
        let (logger, memory) = capture(Level::Debug);
        logger.dpanicx("tolerated", &[]);
        assert_eq!(memory.len(), 1);

        let memory = MemoryAppender::new();
        let dev = Logger::builder()
            .development(true)
            .appender(memory.clone())
            .build();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            dev.dpanicx("fatal in dev", &[]);
        }));
        assert!(result.is_err());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_fatal_runs_hook_after_write() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .appender(memory.clone())
            .fatal_hook(FatalHook::Panic)
            .build();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.fatalx("shutting down", &[]);
        }));
        assert!(result.is_err());
        assert_eq!(memory.count_at(Level::Fatal), 1);
    }

    #[test]
    fn test_disabled_terminal_level_does_nothing() {
        let (logger, memory) = capture(Level::Fatal);
        logger.panicx("suppressed", &[]);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_builder_fields_and_name() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .appender(memory.clone())
            .name("api")
            .fields([Field::string("region", "eu")])
            .build();
        logger.named("db").infox("m", &[Field::int("n", 1)]);

        let entry = memory.last().unwrap();
        assert_eq!(entry.logger.as_deref(), Some("api.db"));
        assert_eq!(
            entry.fields,
            vec![Field::string("region", "eu"), Field::int("n", 1)]
        );
    }

    #[test]
    fn test_nop_logger_writes_nothing() {
        let logger = Logger::nop();
        logger.info(&["hello".into()]);
        assert!(logger.sync().is_ok());
    }
}
