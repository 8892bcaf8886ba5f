//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Stack parsing itself never fails; these errors only cover the
//! configuration and file handling around it.

use thiserror::Error;

/// Errors that can occur while loading SDK frame patterns
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid frame pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read pattern file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid pattern file: {0}")]
    InvalidFile(#[from] serde_json::Error),
}

/// Reasons a function name could not be read from an invocable value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameAccessError {
    #[error("Access to function name denied: {0}")]
    Denied(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
