//! Per-level call styles on [`Logger`]
//!
//! Every level gets eight methods: print (`info`), template (`infof`),
//! key/value (`infow`) and typed fields (`infox`), each in a bound-context
//! form and an `_context` form taking an explicit [`Context`].

use super::{
    context::Context,
    field::{Field, FieldValue},
    log_level::Level,
    logger::Logger,
    sweeten::Arg,
};
use std::fmt;

macro_rules! level_methods {
    ($(
        $level:expr => $print:ident, $print_ctx:ident,
                       $fmt:ident, $fmt_ctx:ident,
                       $kv:ident, $kv_ctx:ident,
                       $typed:ident, $typed_ctx:ident;
    )*) => {
        impl Logger {
            $(
                #[inline]
                pub fn $print(&self, args: &[FieldValue]) {
                    self.log(self.context(), $level, args);
                }

                #[inline]
                pub fn $print_ctx(&self, ctx: &Context, args: &[FieldValue]) {
                    self.log(ctx, $level, args);
                }

                #[inline]
                pub fn $fmt(&self, args: fmt::Arguments<'_>) {
                    self.logf(self.context(), $level, args);
                }

                #[inline]
                pub fn $fmt_ctx(&self, ctx: &Context, args: fmt::Arguments<'_>) {
                    self.logf(ctx, $level, args);
                }

                #[inline]
                pub fn $kv(&self, message: &str, args: &[Arg<'_>]) {
                    self.logw(self.context(), $level, message, args);
                }

                #[inline]
                pub fn $kv_ctx(&self, ctx: &Context, message: &str, args: &[Arg<'_>]) {
                    self.logw(ctx, $level, message, args);
                }

                #[inline]
                pub fn $typed(&self, message: &str, fields: &[Field]) {
                    self.logx(self.context(), $level, message, fields);
                }

                #[inline]
                pub fn $typed_ctx(&self, ctx: &Context, message: &str, fields: &[Field]) {
                    self.logx(ctx, $level, message, fields);
                }
            )*
        }
    };
}

level_methods! {
    Level::Debug => debug, debug_context, debugf, debugf_context,
                    debugw, debugw_context, debugx, debugx_context;
    Level::Info => info, info_context, infof, infof_context,
                   infow, infow_context, infox, infox_context;
    Level::Warn => warn, warn_context, warnf, warnf_context,
                   warnw, warnw_context, warnx, warnx_context;
    Level::Error => error, error_context, errorf, errorf_context,
                    errorw, errorw_context, errorx, errorx_context;
    Level::DPanic => dpanic, dpanic_context, dpanicf, dpanicf_context,
                     dpanicw, dpanicw_context, dpanicx, dpanicx_context;
    Level::Panic => panic, panic_context, panicf, panicf_context,
                    panicw, panicw_context, panicx, panicx_context;
    Level::Fatal => fatal, fatal_context, fatalf, fatalf_context,
                    fatalw, fatalw_context, fatalx, fatalx_context;
}
