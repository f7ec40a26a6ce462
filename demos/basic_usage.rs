//! Basic logger usage example
//!
//! Demonstrates the four call styles and dynamic level changes on a
//! console logger.
//!
//! Run with: cargo run --example basic_usage

use rust_valuer_logger::prelude::*;
use rust_valuer_logger::{args, info, kv};

fn main() -> Result<()> {
    println!("=== Rust Valuer Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .min_level(Level::Debug)
        .appender(ConsoleAppender::new())
        .name("demo")
        .valuers([Valuer::app("basic_usage")])
        .build();

    println!("1. Call styles:");
    logger.debug(args!["print style: ", 1, 2, 3]);
    logger.infof(format_args!("template style: {} + {} = {}", 1, 2, 3));
    logger.warnw("key/value style", kv!["user", "jack", "attempts", 3]);
    logger.errorx(
        "typed field style",
        &[Field::string("path", "/health"), Field::int("status", 503)],
    );
    info!(logger, "macro style: listening on port {}", 8080);

    println!("\n2. Malformed key/value arguments become diagnostics:");
    logger.infow("dangling key", kv!["user", "jack", "orphan"]);

    println!("\n3. Raising the minimum level to WARN:");
    logger.set_level_text("warn")?;
    logger.debugx("hidden", &[]);
    logger.infox("hidden", &[]);
    logger.warnx("visible", &[Field::bool("degraded", true)]);

    logger.sync()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
