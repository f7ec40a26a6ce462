//! Console appender implementation

use crate::core::{Appender, Level, LogEntry, OutputFormat, Result, TimestampFormat};

/// Writes to stdout, and to stderr for Error and above.
pub struct ConsoleAppender {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(cfg!(feature = "console"))
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render `entry` the way `append` would print it.
    pub fn render(&self, entry: &LogEntry) -> String {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.format_colored(entry),
            _ => self.output_format.format(entry, &self.timestamp_format),
        }
    }

    #[cfg(feature = "console")]
    fn format_colored(&self, entry: &LogEntry) -> String {
        use colored::Colorize;

        let level = format!("{:5}", entry.level.to_str())
            .color(entry.level.color_code())
            .to_string();
        let mut line = format!(
            "[{}] [{}] {} - ",
            self.timestamp_format.format(&entry.timestamp),
            level,
            entry.thread_name.as_ref().unwrap_or(&entry.thread_id),
        );
        if let Some(ref name) = entry.logger {
            line.push_str(&name.bold().to_string());
            line.push_str(": ");
        }
        line.push_str(&entry.message);
        for field in entry.resolved_fields() {
            line.push(' ');
            line.push_str(&field.key.dimmed().to_string());
            line.push('=');
            line.push_str(&field.value.to_string());
        }
        line
    }

    #[cfg(not(feature = "console"))]
    fn format_colored(&self, entry: &LogEntry) -> String {
        OutputFormat::Text.format(entry, &self.timestamp_format)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry);
        if entry.level >= Level::Error {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Field;

    #[test]
    fn test_render_plain_text() {
        let appender = ConsoleAppender::with_colors(false);
        let entry = LogEntry::new(Level::Info, "ready").with_fields(vec![Field::int("port", 80)]);
        let line = appender.render(&entry);
        assert!(line.contains("[INFO ]"));
        assert!(line.ends_with("ready port=80"));
    }

    #[test]
    fn test_render_json() {
        let appender = ConsoleAppender::new().with_output_format(OutputFormat::Json);
        let entry = LogEntry::new(Level::Error, "boom");
        let parsed: serde_json::Value = serde_json::from_str(&appender.render(&entry)).unwrap();
        assert_eq!(parsed["level"], "ERROR");
    }
}
