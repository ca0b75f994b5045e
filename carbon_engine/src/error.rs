//! Error types for the Carbon engine
//!
//! This module defines the error types used throughout the engine,
//! including resource loading, configuration, and device failures.

use std::fmt;

/// Result type for Carbon engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Carbon engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (device, driver, etc.)
    BackendError(String),

    /// Out of device memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, shader, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, manager, subsystems)
    InitializationFailed(String),

    /// A resource's load step failed
    LoadFailed {
        /// Resource name at the time of the failure
        name: String,
        /// Human readable cause
        reason: String,
    },

    /// A required item was not found
    NotFound(String),

    /// Precondition violated by the caller
    InvalidState(String),

    /// File system failure
    Io(String),

    /// Configuration parse or write failure
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of device memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::LoadFailed { name, reason } => {
                write!(f, "Failed to load resource '{}': {}", name, reason)
            }
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an error and return it from the current function
///
/// # Example
///
/// ```ignore
/// engine_bail!("carbon::ResourceManager", "Texture '{}' not found", name);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        return Err($crate::carbon::Error::BackendError(message));
    }};
}

/// Log an error and evaluate to it (for `ok_or_else` / `map_err`)
///
/// # Example
///
/// ```ignore
/// let world = world.ok_or_else(|| engine_err!("carbon::ResourceManager", "No world"))?;
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::carbon::Error::BackendError(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
