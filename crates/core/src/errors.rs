//! Core error types for the networth engine.
//!
//! Aggregation itself never fails: malformed portfolio data degrades to zero.
//! Errors only arise at the boundary, when a configuration or a whole
//! document cannot be read.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidDocument(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
