//! File logging example
//!
//! Builds a logger from a JSON configuration that writes to both the
//! console and a JSON log file.
//!
//! Run with: cargo run --example file_logging

use rust_valuer_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Valuer Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json_str(
        r#"{
            "level": "debug",
            "format": "json",
            "adapter": "multi",
            "filename": "application.log",
            "name": "files"
        }"#,
    )?;
    let logger = config.build()?.with_valuer([Valuer::component("importer")]);

    println!("1. Logging to both console and file:");
    logger.infox("Application started", &[]);
    logger.debugx("Loading configuration", &[Field::string("source", "inline")]);
    logger.warnw(
        "Using default settings",
        &[Arg::from("retries"), Arg::from(3), Arg::from("timeout_ms"), Arg::from(500)],
    );

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.infow(
            "Processing item",
            &[Arg::from("item"), Arg::from(i), Arg::from("of"), Arg::from(5)],
        );
        if i == 3 {
            logger.warnx("Item took longer than expected", &[Field::int("item", i)]);
        }
    }

    logger.infox("All operations completed", &[]);
    logger.sync()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the JSON log output", config.file_path().display());

    Ok(())
}

