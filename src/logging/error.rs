//! Logging-specific error types
//!
//! These errors can occur while reading the log configuration file, opening
//! the log file, or installing the selected logger.
//!
//! # Error Types
//!
//! - **`Config`**: The log configuration file could not be read
//! - **`InvalidLevel`**: The configured level is not a `log` level name
//! - **`LogFile`**: The log file could not be opened for appending
//! - **`AlreadyInstalled`**: A global logger was installed before

use std::path::PathBuf;
use thiserror::Error;

/// Logging-specific errors
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log configuration file is unreadable or malformed
    #[error("Failed to read log configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Unknown level name in the log configuration
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to open the log file
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The global `log` logger is already set
    #[error("A global logger is already installed")]
    AlreadyInstalled,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
