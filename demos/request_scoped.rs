//! Request-scoped logging example
//!
//! Each simulated request derives its own logger carrying a context with
//! a trace id; the trace id valuer reads it at every call. The global
//! default logger is used for process-level messages.
//!
//! Run with: cargo run --example request_scoped

use rust_valuer_logger::global;
use rust_valuer_logger::prelude::*;
use std::thread;

#[derive(Debug, Clone)]
struct TraceId(String);

fn handle(logger: &Logger, ctx: &Context, path: &str) {
    logger.infox_context(ctx, "request received", &[Field::string("path", path)]);
    if path.ends_with("missing") {
        logger.warnw_context(ctx, "not found", &[Arg::from("status"), Arg::from(404)]);
    } else {
        logger.infow_context(ctx, "served", &[Arg::from("status"), Arg::from(200)]);
    }
}

fn main() -> Result<()> {
    println!("=== Rust Valuer Logger - Request Scoped Example ===\n");

    let mut root = Logger::builder()
        .appender(ConsoleAppender::new().with_output_format(OutputFormat::Logfmt))
        .build();
    root.set_default_valuer([Valuer::package("demos"), Valuer::app("request_scoped")]);
    global::replace_globals(root.clone());

    let http = root.named("http").with_valuer([Valuer::from_string("traceId", |ctx| {
        ctx.value::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_default()
    })]);

    global::infox("server starting", &[Field::int("workers", 3)]);

    let handles: Vec<_> = ["/users", "/orders", "/missing"]
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            let logger = http.clone();
            thread::spawn(move || {
                let ctx = Context::background().with_value(TraceId(format!("trace-{:04}", i)));
                handle(&logger, &ctx, path);
            })
        })
        .collect();
    for worker in handles {
        let _ = worker.join();
    }

    global::infox("server stopped", &[]);
    global::sync()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
