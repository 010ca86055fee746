//! Error types for the Atlas country browser.

use std::time::Duration;
use thiserror::Error;

/// Fetch errors - the source could not produce a dataset.
///
/// These never reach the query engine as failures: the previous dataset is
/// kept and the error is surfaced to the UI as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source answered with a non-success status.
    #[error("Source returned status {code}")]
    Status { code: u16 },

    /// The payload did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// IO error reading a local source.
    #[error("IO error: {0}")]
    Io(String),

    /// The source did not answer in time.
    #[error("Fetch timeout after {duration:?}")]
    Timeout { duration: Duration },
}

/// Query errors.
///
/// Not fatal: an invalid selection still commits and simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A selection named a record that is not in the dataset.
    #[error("No record named '{name}'")]
    InvalidSelection { name: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
