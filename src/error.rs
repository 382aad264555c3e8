//! Error types for key analysis and identifier validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, analyzing, or validating records
#[derive(Error, Debug)]
pub enum KeyscanError {
    /// A file could not be opened or read
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file held no decodable record
    #[error("No records loaded from {}", path.display())]
    NoRecords { path: PathBuf },

    /// A line did not decode as a JSON value
    #[error("JSON parsing error at line {line}: {message}")]
    RecordDecode { line: usize, message: String },

    /// A field path expression could not be parsed
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Pattern matching error
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report export failed
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyscanError {
    /// Build a file access error for `path`
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KeyscanError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            KeyscanError::FileAccess { path, source } => {
                format!(
                    "Cannot access {}: {source}\n\nHint: Check that the file exists and is readable.",
                    path.display()
                )
            }
            KeyscanError::NoRecords { path } => {
                format!(
                    "No records loaded from {}\n\n\
                    Hint: Each line should hold one JSON value.",
                    path.display()
                )
            }
            KeyscanError::InvalidPath { path, reason } => {
                format!(
                    "Invalid field path '{path}': {reason}\n\n\
                    Hint: Use dot-separated keys with optional [0] steps, e.g. 'Legs[0].Tenor'."
                )
            }
            KeyscanError::InvalidPattern(pattern) => {
                format!(
                    "Invalid glob pattern: {pattern}\n\n\
                    Hint: Use standard glob syntax like '*.json' or '**/*.jsonl'."
                )
            }
            KeyscanError::InvalidConfig(msg) => {
                format!("Invalid configuration: {msg}\n\nHint: Check your keyscan configuration file.")
            }
            _ => self.to_string(),
        }
    }
}
