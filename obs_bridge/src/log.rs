//! Logging for the OBS bridge
//!
//! Everything in the bridge logs through a single replaceable [`Logger`]
//! owned by [`crate::osn::Bridge`]. The host process can swap it for one that
//! forwards entries to its own log sink; by default lines go to stdout with
//! colour and a local timestamp.
//!
//! ERROR entries produced by `bridge_error!` carry the file:line they were
//! raised from.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for bridge log entries
///
/// # Example
///
/// ```no_run
/// use obs_bridge::osn::log::{Logger, LogEntry};
///
/// struct HostLogger;
///
/// impl Logger for HostLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{} {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Handle one log entry
    fn log(&self, entry: &LogEntry);
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,

    pub timestamp: SystemTime,

    /// Emitting component (e.g. "osn::IndexAllocator")
    pub source: String,

    pub message: String,

    /// Source file, only set for ERROR entries
    pub file: Option<&'static str>,

    /// Source line, only set for ERROR entries
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogSeverity {
    /// Fixed-width label used in console output
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Console logger used until the host installs its own
///
/// Entries below `min_severity` are dropped. Format:
/// - `[timestamp] [SEVERITY] [source] message`
/// - `[timestamp] [ERROR] [source] message (file:line)`
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    pub min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Console logger that prints INFO and above
    pub fn new() -> Self {
        Self {
            min_severity: LogSeverity::Info,
        }
    }

    /// Console logger with an explicit threshold
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    /// Whether an entry of this severity would be printed
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }

    /// Render an entry without colour codes
    pub fn format_plain(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f");

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, entry.severity.label(), entry.source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, entry.severity.label(), entry.source, entry.message
            ),
        }
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if !self.accepts(entry.severity) {
            return;
        }

        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let label = entry.severity.label();
        let severity_str = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };
        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```ignore
/// bridge_trace!("osn::IndexAllocator", "extended range down to {}", id);
/// ```
#[macro_export]
macro_rules! bridge_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::osn::Bridge::log(
            $crate::osn::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! bridge_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::osn::Bridge::log(
            $crate::osn::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! bridge_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::osn::Bridge::log(
            $crate::osn::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! bridge_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::osn::Bridge::log(
            $crate::osn::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// ```ignore
/// bridge_error!("osn::ObjectManager", "handle {} is not allocated", handle);
/// ```
#[macro_export]
macro_rules! bridge_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::osn::Bridge::log_detailed(
            $crate::osn::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
