//! Log level definitions and the shared atomic level gate

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(i8)]
pub enum Level {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    /// Panics after logging when the sink runs in development mode.
    DPanic = 3,
    /// Panics after logging.
    Panic = 4,
    /// Terminates the process after logging.
    Fatal = 5,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Numeric verbosity value of this level.
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Map a numeric verbosity back to a level.
    ///
    /// Values below `Debug` saturate to `Debug`, values above `Fatal` to `Fatal`.
    pub fn from_i8(v: i8) -> Self {
        match v {
            i8::MIN..=-1 => Level::Debug,
            0 => Level::Info,
            1 => Level::Warn,
            2 => Level::Error,
            3 => Level::DPanic,
            4 => Level::Panic,
            _ => Level::Fatal,
        }
    }

    /// Whether logging at this level ends in a panic or process exit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Level::DPanic | Level::Panic | Level::Fatal)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::DPanic | Level::Panic => BrightRed,
            Level::Fatal => Magenta,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            // an unset level means the default
            "" | "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "dpanic" => Ok(Level::DPanic),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

/// A minimum-severity threshold that can be read and changed atomically.
///
/// Cloning an `AtomicLevel` shares the underlying cell: every logger holding a
/// clone observes `set_level` immediately. Use [`AtomicLevel::detached`] to
/// get an independent cell.
#[derive(Debug, Clone)]
pub struct AtomicLevel {
    level: Arc<AtomicI8>,
}

impl AtomicLevel {
    /// Create a gate enabled at `Info` and above.
    pub fn new() -> Self {
        Self::new_at(Level::Info)
    }

    pub fn new_at(level: Level) -> Self {
        Self {
            level: Arc::new(AtomicI8::new(level.as_i8())),
        }
    }

    #[inline]
    pub fn level(&self) -> Level {
        Level::from_i8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_level(&self, level: Level) {
        self.level.store(level.as_i8(), Ordering::Relaxed);
    }

    /// Parse `text` and apply it. The gate is left untouched on error.
    pub fn set_level_text(&self, text: &str) -> Result<()> {
        let level: Level = text.parse()?;
        self.set_level(level);
        Ok(())
    }

    /// Returns true if `level` is at or above the current minimum.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.as_i8() >= self.level.load(Ordering::Relaxed)
    }

    /// A new gate holding the current value, no longer shared with `self`.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self::new_at(self.level())
    }

    /// Whether two gates share the same cell.
    pub fn ptr_eq(&self, other: &AtomicLevel) -> bool {
        Arc::ptr_eq(&self.level, &other.level)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new_at(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Error < Level::DPanic);
        assert!(Level::Panic < Level::Fatal);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("DPANIC".parse::<Level>().unwrap(), Level::DPanic);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("".parse::<Level>().unwrap(), Level::Info);
    }

    #[test]
    fn test_parse_invalid_level() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert_eq!(err.to_string(), "Invalid level text: 'verbose'");
    }

    #[test]
    fn test_from_i8_saturates() {
        assert_eq!(Level::from_i8(-5), Level::Debug);
        assert_eq!(Level::from_i8(2), Level::Error);
        assert_eq!(Level::from_i8(100), Level::Fatal);
    }

    #[test]
    fn test_atomic_level_enabled() {
        let gate = AtomicLevel::new_at(Level::Warn);
        assert!(!gate.enabled(Level::Info));
        assert!(gate.enabled(Level::Warn));
        assert!(gate.enabled(Level::Fatal));
    }

    #[test]
    fn test_atomic_level_shared_by_clone() {
        let gate = AtomicLevel::new();
        let shared = gate.clone();
        shared.set_level(Level::Error);
        assert_eq!(gate.level(), Level::Error);
        assert!(gate.ptr_eq(&shared));
    }

    #[test]
    fn test_atomic_level_detached() {
        let gate = AtomicLevel::new_at(Level::Debug);
        let own = gate.detached();
        own.set_level(Level::Fatal);
        assert_eq!(gate.level(), Level::Debug);
        assert!(!gate.ptr_eq(&own));
    }

    #[test]
    fn test_set_level_text_keeps_level_on_error() {
        let gate = AtomicLevel::new_at(Level::Warn);
        assert!(gate.set_level_text("loud").is_err());
        assert_eq!(gate.level(), Level::Warn);
        gate.set_level_text("debug").unwrap();
        assert_eq!(gate.level(), Level::Debug);
    }
}
