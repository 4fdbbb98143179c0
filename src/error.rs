use std::io;
use thiserror::Error;

/// Errors surfaced by the aviary crate.
///
/// Lookup and removal misses are not errors; they come back as `None` or a
/// zero count from the store.
#[derive(Error, Debug)]
pub enum AviaryError {
    #[error("Malformed input in '{source_name}' at line {line}: {reason}")]
    MalformedInput {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid scenario '{source_name}': {message}")]
    Config { source_name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Store invariant violated: {0}")]
    InvariantViolation(String),
}

impl AviaryError {
    pub fn malformed(source_name: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, AviaryError::MalformedInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, AviaryError>;
