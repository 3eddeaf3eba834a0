/// Process-wide logging hub for the OBS bridge
///
/// The bridge keeps exactly one piece of global state: the active [`Logger`].
/// Handle allocation is never global; every object manager owns its own
/// allocator.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Active logger (DefaultLogger until the host replaces it)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

/// Entry point for bridge-wide services
///
/// # Example
///
/// ```no_run
/// use obs_bridge::osn::{Bridge, log::{Logger, LogEntry}};
///
/// struct HostLogger;
/// impl Logger for HostLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the host process...
///     }
/// }
///
/// Bridge::set_logger(HostLogger);
/// ```
pub struct Bridge;

impl Bridge {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Go back to the console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Log without source location
    ///
    /// Used by `bridge_trace!` through `bridge_warn!`.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Log with file:line, used by `bridge_error!`
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        // A poisoned logger drops the entry rather than taking the caller down
        if let Ok(lock) = logger_lock().read() {
            lock.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
