//! keyscan - primary key discovery and identifier validation for JSON lines
//!
//! Provides:
//! - Bounded loading of line-delimited JSON records
//! - Field path discovery through nested objects and arrays
//! - Uniqueness and coverage scoring of every discovered path
//! - Cross-file duplicate detection for a designated identifier field
//! - CSV export of candidate and structure summaries

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod record;
pub mod validation;

// Re-export commonly used types
pub use analysis::{
    AnalysisConfig, AnalysisReport, BatchReport, CandidateThresholds, FieldStatistics,
    PrimaryKeyCandidate, PrimaryKeyDetector,
};
pub use config::KeyscanConfig;
pub use discovery::discover_files;
pub use error::KeyscanError;
pub use export::ExportError;
pub use record::{FieldPath, LoadedRecords, load_records};
pub use validation::{
    DuplicateEntry, DuplicateRegistry, Location, UniquenessValidator, ValidationConfig,
    ValidationReport,
};
