//! Error types for the OBS bridge
//!
//! The index allocator itself never fails with an error (exhaustion is an
//! empty `Option`). Errors appear one level up, where object managers turn
//! a stale handle or an exhausted index window into something the IPC layer
//! can report back to the caller.

use std::fmt;

/// Result type for OBS bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// OBS bridge errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A handle that is not currently allocated was used to reach an object
    InvalidReference(u32),

    /// Every id in the configured index window is in use
    IndexExhausted,

    /// A manager lock was poisoned by a panicking thread
    LockPoisoned(String),

    /// Rejected allocator or manager configuration
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidReference(handle) => write!(f, "Invalid reference: handle {} is not allocated", handle),
            Error::IndexExhausted => write!(f, "Index space exhausted"),
            Error::LockPoisoned(msg) => write!(f, "Lock poisoned: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error at ERROR severity (with file:line) and evaluate to it
///
/// # Example
///
/// ```ignore
/// let err = bridge_err!("osn::ObjectManager", Error::InvalidReference(handle));
/// ```
#[macro_export]
macro_rules! bridge_err {
    ($source:expr, $err:expr) => {{
        let err: $crate::osn::Error = $err;
        $crate::bridge_error!($source, "{}", err);
        err
    }};
}

/// Log an error at ERROR severity (with file:line) and return it as `Err`
///
/// # Example
///
/// ```ignore
/// bridge_bail!("osn::ObjectManager", Error::IndexExhausted);
/// ```
#[macro_export]
macro_rules! bridge_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::bridge_err!($source, $err))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
