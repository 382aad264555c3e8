//! CLI error types

use std::path::PathBuf;

use keyscan::{ExportError, KeyscanError};
use thiserror::Error;

/// Errors that end a CLI run with exit code 1
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Keyscan(#[from] KeyscanError),

    #[error("Failed to write reports: {0}")]
    Export(#[from] ExportError),

    #[error("Cannot create output directory {}: {}", .0.display(), .1)]
    OutputDirectory(PathBuf, std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Message shown to the user, with hints where the library provides them
    pub fn user_message(&self) -> String {
        match self {
            CliError::Keyscan(e) => e.user_message(),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
