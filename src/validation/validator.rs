//! Cross-file identifier uniqueness validation

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ValidationConfig;
use super::registry::{DuplicateEntry, DuplicateRegistry, Location};
use crate::analysis::{FileFailure, display_name};
use crate::error::KeyscanError;
use crate::record::{FieldPath, LineOutcome, RecordReader, canonical_string};

const UNKNOWN: &str = "Unknown";

/// How one record affected the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First sighting of the identifier in this run
    First,
    /// The identifier was seen before; the location was registered
    Duplicate,
    /// The identifier path did not resolve; the record was ignored
    Unresolved,
}

/// One of the leading identifier occurrences, kept for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierExample {
    pub value: String,
    pub file: String,
    /// Configured classification fields, `Unknown` when missing
    pub facets: Vec<(String, String)>,
}

/// Summary of one scanned file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileScan {
    pub file: String,
    /// Decoded records scanned
    pub records_scanned: usize,
    /// Records whose identifier resolved
    pub identifiers_found: usize,
    /// Distinct identifiers within this file
    pub distinct_identifiers: usize,
    /// Occurrences registered as duplicates
    pub duplicates_found: usize,
    /// Records without the identifier
    pub unresolved: usize,
    /// Lines that failed to decode
    pub skipped_lines: usize,
}

/// Shape consistency of all distinct identifier values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAnalysis {
    /// Smallest observed value
    pub sample_value: String,
    /// Union of characters used, sorted
    pub character_set: String,
    /// Distinct lengths in characters, ascending
    pub lengths: Vec<usize>,
    /// Exactly one distinct length occurs
    pub consistent_length: bool,
}

impl FormatAnalysis {
    fn from_values<'a>(values: impl Iterator<Item = &'a str>) -> Option<Self> {
        let mut sample: Option<&str> = None;
        let mut chars = BTreeSet::new();
        let mut lengths = BTreeSet::new();

        for value in values {
            if sample.is_none_or(|current| value < current) {
                sample = Some(value);
            }
            chars.extend(value.chars());
            lengths.insert(value.chars().count());
        }

        sample.map(|sample| Self {
            sample_value: sample.to_string(),
            character_set: chars.into_iter().collect(),
            consistent_length: lengths.len() == 1,
            lengths: lengths.into_iter().collect(),
        })
    }
}

/// Final result of a validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub identifier: FieldPath,
    /// Per-file summaries, in scan order
    pub files: Vec<FileScan>,
    /// Files that could not be read
    pub failures: Vec<FileFailure>,
    /// Distinct identifiers across all files
    pub total_unique: usize,
    /// Duplicated identifiers, in order of their first repeat
    pub duplicates: Vec<DuplicateEntry>,
    pub examples: Vec<IdentifierExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatAnalysis>,
    /// `true` when no identifier occurred twice
    pub is_unique: bool,
}

impl ValidationReport {
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    pub fn records_scanned(&self) -> usize {
        self.files.iter().map(|f| f.records_scanned).sum()
    }
}

/// Checks that one identifier path is unique across many files
///
/// Holds a single [`DuplicateRegistry`] for the whole run. Create one
/// validator per run and consume it with [`UniquenessValidator::finish`].
pub struct UniquenessValidator {
    config: ValidationConfig,
    registry: DuplicateRegistry,
    examples: Vec<IdentifierExample>,
    files: Vec<FileScan>,
    failures: Vec<FileFailure>,
}

impl UniquenessValidator {
    /// Create a validator with default configuration
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a validator with custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            registry: DuplicateRegistry::new(),
            examples: Vec::new(),
            files: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn registry(&self) -> &DuplicateRegistry {
        &self.registry
    }

    /// Register the identifier of one record read at `location`
    pub fn observe(&mut self, record: &Value, location: Location) -> Observation {
        self.register(record, location).0
    }

    fn register(&mut self, record: &Value, location: Location) -> (Observation, Option<String>) {
        let Some(resolved) = self.config.identifier.resolve_present(record) else {
            return (Observation::Unresolved, None);
        };
        let value = canonical_string(resolved);

        if self.examples.len() < self.config.max_examples {
            let facets = self
                .config
                .example_facets
                .iter()
                .map(|spec| {
                    let shown = spec
                        .path
                        .resolve_present(record)
                        .map(canonical_string)
                        .unwrap_or_else(|| UNKNOWN.to_string());
                    (spec.name.clone(), shown)
                })
                .collect();
            self.examples.push(IdentifierExample {
                value: value.clone(),
                file: location.file.clone(),
                facets,
            });
        }

        let observation = if self.registry.record(&value, location) {
            Observation::Duplicate
        } else {
            Observation::First
        };
        (observation, Some(value))
    }

    /// Scan the lines of one input labelled `source`
    ///
    /// Scanning stops once `max_records_per_file` records carrying the
    /// identifier have been registered. Records without it do not count
    /// against the cap.
    pub fn scan_reader<R: BufRead>(
        &mut self,
        source: &str,
        reader: R,
    ) -> Result<&FileScan, std::io::Error> {
        let cap = self.config.max_records_per_file;
        let mut scan = FileScan {
            file: source.to_string(),
            ..FileScan::default()
        };
        let mut in_file: HashSet<String> = HashSet::new();

        for item in RecordReader::new(reader) {
            let (line, outcome) = item?;
            let record = match outcome {
                LineOutcome::Record(value) => value,
                LineOutcome::Blank => continue,
                LineOutcome::Invalid(message) => {
                    tracing::debug!(file = source, line, %message, "Skipping undecodable line");
                    scan.skipped_lines += 1;
                    continue;
                }
            };

            scan.records_scanned += 1;
            let (observation, value) = self.register(&record, Location::new(source, line));
            match observation {
                Observation::Unresolved => scan.unresolved += 1,
                Observation::First => scan.identifiers_found += 1,
                Observation::Duplicate => {
                    scan.identifiers_found += 1;
                    scan.duplicates_found += 1;
                }
            }
            in_file.extend(value);

            if cap > 0 && scan.identifiers_found >= cap {
                break;
            }
        }

        scan.distinct_identifiers = in_file.len();
        tracing::info!(
            file = source,
            records = scan.records_scanned,
            distinct = scan.distinct_identifiers,
            duplicates = scan.duplicates_found,
            "Scanned file"
        );

        self.files.push(scan);
        Ok(&self.files[self.files.len() - 1])
    }

    /// Open and scan one file
    ///
    /// The file is closed before this returns. An inaccessible file is
    /// recorded as a failure and reported to the caller.
    pub fn scan_file(&mut self, path: &Path) -> Result<&FileScan, KeyscanError> {
        let opened = File::open(path);
        let file = match opened {
            Ok(file) => file,
            Err(e) => return Err(self.fail(path, e)),
        };

        let name = display_name(path);
        let result = {
            let reader = BufReader::new(file);
            self.scan_reader(&name, reader).map(|_| ())
        };

        match result {
            Ok(()) => Ok(&self.files[self.files.len() - 1]),
            Err(e) => Err(self.fail(path, e)),
        }
    }

    /// Scan files in order, skipping the ones that cannot be read
    pub fn scan_files<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for path in paths {
            if let Err(e) = self.scan_file(path.as_ref()) {
                tracing::warn!(error = %e, "Skipping file");
            }
        }
    }

    fn fail(&mut self, path: &Path, source: std::io::Error) -> KeyscanError {
        let error = KeyscanError::file_access(path, source);
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: error.to_string(),
        });
        error
    }

    /// Finish the run and build the report
    pub fn finish(self) -> ValidationReport {
        let duplicates: Vec<DuplicateEntry> = self
            .registry
            .entries()
            .map(|(value, locations)| DuplicateEntry {
                value: value.to_string(),
                locations: locations.to_vec(),
            })
            .collect();

        ValidationReport {
            generated_at: Utc::now(),
            identifier: self.config.identifier,
            files: self.files,
            failures: self.failures,
            total_unique: self.registry.distinct_count(),
            is_unique: self.registry.is_empty(),
            format: FormatAnalysis::from_values(self.registry.observed()),
            duplicates,
            examples: self.examples,
        }
    }
}

impl Default for UniquenessValidator {
    fn default() -> Self {
        Self::new()
    }
}
