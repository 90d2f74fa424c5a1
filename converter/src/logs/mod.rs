//! Leveled progress logging.
//!
//! Entries go to stderr so converted documents written to stdout stay
//! clean. Two formats are available: a human one with level prefixes and
//! JSON lines for tooling.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
    /// RFC 3339 creation time
    pub timestamp: String,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Human-readable line, without trailing newline.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stderr.
pub struct Logger {
    quiet: AtomicBool,
    json: AtomicBool,
    // Serializes writes from concurrent callers.
    lock: Mutex<()>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            json: AtomicBool::new(false),
            lock: Mutex::new(()),
        }
    }

    /// Suppress everything except errors.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Emit JSON lines instead of human-readable text.
    pub fn set_json(&self, json: bool) {
        self.json.store(json, Ordering::Relaxed);
    }

    /// Whether `entry` would be written under the current settings.
    pub fn enabled(&self, entry: &LogEntry) -> bool {
        entry.level == LogLevel::Error || !self.quiet.load(Ordering::Relaxed)
    }

    /// Format `entry` for output under the current settings.
    pub fn format(&self, entry: &LogEntry) -> String {
        if self.json.load(Ordering::Relaxed) {
            serde_json::to_string(entry).unwrap_or_else(|_| entry.render())
        } else {
            entry.render()
        }
    }

    /// Write a log entry to stderr
    pub fn log(&self, entry: LogEntry) {
        if !self.enabled(&entry) {
            return;
        }
        let line = self.format(&entry);
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Nothing sensible to do if stderr is gone
        let _ = writeln!(std::io::stderr(), "{}", line);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes() {
        assert_eq!(LogEntry::info("reading").render(), "    reading");
        assert_eq!(LogEntry::success("done").render(), "   ✓ done");
        assert_eq!(LogEntry::error("boom").with_indent(1).render(), "      ❌ boom");
    }

    #[test]
    fn test_quiet_keeps_errors() {
        let logger = Logger::new();
        logger.set_quiet(true);
        assert!(!logger.enabled(&LogEntry::info("x")));
        assert!(!logger.enabled(&LogEntry::warning("x")));
        assert!(logger.enabled(&LogEntry::error("x")));
    }

    #[test]
    fn test_json_format() {
        let logger = Logger::new();
        logger.set_json(true);
        let line = logger.format(&LogEntry::warning("skipped 1_vote.csv").with_indent(2));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "warning");
        assert_eq!(value["message"], "skipped 1_vote.csv");
        assert_eq!(value["indent"], 2);
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }
}
