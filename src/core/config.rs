//! Declarative logger configuration
//!
//! ```
//! use rust_valuer_logger::LoggerConfig;
//!
//! let config = LoggerConfig::from_json_str(r#"{"level":"debug","format":"json"}"#).unwrap();
//! let logger = config.build().unwrap();
//! assert!(logger.enabled(rust_valuer_logger::Level::Debug));
//! ```

use super::{
    error::{LoggerError, Result},
    log_level::Level,
    logger::{Logger, LoggerBuilder},
    output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Where entries are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adapter {
    #[default]
    Console,
    File,
    /// Console and file
    Multi,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// debug, info, warn, error, dpanic, panic or fatal
    pub level: String,
    /// text, json or logfmt
    pub format: String,
    /// Preset name or a chrono pattern
    pub timestamp_format: String,
    pub development: bool,
    pub name: Option<String>,
    pub colors: bool,
    /// Attach stack traces to DPanic, Panic and Fatal entries
    pub stack: bool,
    pub adapter: Adapter,
    /// Directory for the log file, current directory when empty
    pub path: Option<PathBuf>,
    /// Log file name, `<process name>.log` when empty
    pub filename: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            timestamp_format: String::new(),
            development: false,
            name: None,
            colors: true,
            stack: false,
            adapter: Adapter::Console,
            path: None,
            filename: None,
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Full path of the log file used by the file and multi adapters.
    pub fn file_path(&self) -> PathBuf {
        let filename = match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}.log", process_name()),
        };
        match self.path {
            Some(ref dir) => dir.join(filename),
            None => PathBuf::from(filename),
        }
    }

    pub fn build(&self) -> Result<Logger> {
        Ok(LoggerBuilder::from_config(self)?.build())
    }
}

impl LoggerBuilder {
    /// A builder with the level, development flag, name and appenders
    /// described by `config`.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let level = Level::from_str(&config.level)?;
        let format = OutputFormat::from_str(&config.format)?;
        let timestamp = TimestampFormat::from_str(&config.timestamp_format)?;

        let mut builder = LoggerBuilder::new()
            .min_level(level)
            .development(config.development)
            .stack(config.stack);
        if let Some(ref name) = config.name {
            builder = builder.name(name.clone());
        }

        if matches!(config.adapter, Adapter::Console | Adapter::Multi) {
            builder = builder.appender(
                ConsoleAppender::with_colors(config.colors && cfg!(feature = "console"))
                    .with_output_format(format)
                    .with_timestamp_format(timestamp.clone()),
            );
        }
        if matches!(config.adapter, Adapter::File | Adapter::Multi) {
            let path = config.file_path();
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("filename", "empty log file path"));
            }
            builder = builder.appender(
                FileAppender::new(path)?
                    .with_output_format(format)
                    .with_timestamp_format(timestamp),
            );
        }
        Ok(builder)
    }
}

fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "app".to_string())
}
