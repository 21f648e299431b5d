//! Error types for zram-advisor.
//!
//! Covers raw stats acquisition, configuration parsing, and terminal output.
//! Degenerate arithmetic in the projection model is never an error.

use std::io;
use thiserror::Error;

/// Error type for advisor operations.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// No active compressed-swap device was found.
    #[error("NO zRAM: zRAM is either not installed or not enabled")]
    NoZram,

    /// A raw stats source could not produce a complete record.
    #[error("failed to collect '{source_name}': {message}")]
    CollectionFailed {
        /// The source that failed (e.g. "meminfo", "zram0").
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// Terminal initialization or rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl AdvisorError {
    /// Shorthand for a [`AdvisorError::CollectionFailed`].
    pub fn collection(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CollectionFailed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this error.
    ///
    /// "No zRAM" is distinct from every other fault.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoZram => 1,
            _ => 15,
        }
    }
}

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, AdvisorError>;
