//! Tabular report export
//!
//! Writes the primary key candidates and structure summaries of a batch of
//! analysis reports as CSV.

mod tabular;

pub use tabular::{
    CANDIDATES_FILE, STRUCTURE_FILE, write_candidates, write_candidates_file,
    write_structure_summary, write_structure_summary_file,
};

use thiserror::Error;

/// Errors that can occur while exporting reports
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
