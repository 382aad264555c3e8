//! Cross-file identifier validation
//!
//! Confirms that a designated identifier path (by default `Identifier.UPI`) is
//! unique across every scanned file, and records each repeat occurrence with
//! its file and line.
//!
//! ## Example
//!
//! ```rust,ignore
//! use keyscan::validation::UniquenessValidator;
//!
//! let mut validator = UniquenessValidator::new();
//! validator.scan_files(&files);
//! let report = validator.finish();
//! if !report.is_unique {
//!     for entry in &report.duplicates {
//!         println!("{} repeated at {:?}", entry.value, entry.locations);
//!     }
//! }
//! ```

mod config;
mod registry;
mod validator;

pub use config::{ValidationConfig, ValidationConfigBuilder};
pub use registry::{DuplicateEntry, DuplicateRegistry, Location};
pub use validator::{
    FileScan, FormatAnalysis, IdentifierExample, Observation, UniquenessValidator,
    ValidationReport,
};
