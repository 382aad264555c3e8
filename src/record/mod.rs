//! Record loading and field path resolution
//!
//! Shared by primary key analysis and identifier validation: both read the
//! same line-delimited JSON contract and resolve paths with the same rules.

mod loader;
mod path;

pub use loader::{
    LineOutcome, LoadedRecords, RecordReader, decode_line, load_records, read_records,
};
pub use path::{FieldPath, PathStep, canonical_string};
