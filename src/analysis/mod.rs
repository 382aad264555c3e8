//! Primary key detection for line-delimited JSON
//!
//! This module discovers the field paths exposed by nested records and scores
//! each one as a candidate unique identifier.
//!
//! ## Pipeline
//!
//! - **Path discovery** - walk the first records (10 by default) and collect
//!   every object-key path; arrays are followed through element 0 only
//! - **Field analysis** - resolve each path against every loaded record and
//!   count total and distinct values
//! - **Ranking** - keep fields with uniqueness ≥ 0.95, coverage ≥ 0.9 and more
//!   than one distinct value, ordered by uniqueness then coverage
//! - **Structure profile** - top-level key frequencies and categorical facets
//!
//! ## Example
//!
//! ```rust,ignore
//! use keyscan::analysis::PrimaryKeyDetector;
//!
//! let detector = PrimaryKeyDetector::new();
//! let report = detector.analyze_file(Path::new("trades.json"))?;
//! for candidate in &report.candidates {
//!     println!("{} ({:.3})", candidate.path(), candidate.statistics.uniqueness_ratio);
//! }
//! ```

mod config;
mod detector;
mod extractor;
mod field;
mod profile;
mod ranker;

pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use detector::{AnalysisReport, BatchReport, FileFailure, PrimaryKeyDetector};
pub(crate) use detector::display_name;
pub use extractor::{discover_paths, extract_paths};
pub use field::{FieldStatistics, analyze_field};
pub use profile::{FacetCounts, FacetSpec, StructureProfile, default_facets, profile_structure};
pub use ranker::{CandidateThresholds, PrimaryKeyCandidate, rank_candidates};
