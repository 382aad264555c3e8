//! Primary key detection over one or many files

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::AnalysisConfig;
use super::extractor::discover_paths;
use super::field::{FieldStatistics, analyze_field};
use super::profile::{StructureProfile, profile_structure};
use super::ranker::{PrimaryKeyCandidate, rank_candidates};
use crate::error::KeyscanError;
use crate::record::{FieldPath, LoadedRecords, load_records};

/// Analysis result for one record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// File name the records came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Records analyzed
    pub record_count: usize,
    /// Lines that failed to decode
    pub skipped_lines: usize,
    /// Ranked primary key candidates
    pub candidates: Vec<PrimaryKeyCandidate>,
    /// Statistics for every discovered path, alphabetically
    pub field_statistics: BTreeMap<FieldPath, FieldStatistics>,
    /// Structure summary
    pub structure: StructureProfile,
}

impl AnalysisReport {
    /// The best-ranked candidate, if any
    pub fn best_candidate(&self) -> Option<&PrimaryKeyCandidate> {
        self.candidates.first()
    }
}

/// A file that could not be analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Results of analyzing many files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    /// Per-file reports, in input order
    pub reports: Vec<AnalysisReport>,
    /// Files that were skipped, with the reason
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty() && self.failures.is_empty()
    }
}

/// Primary key detection engine
///
/// Discovers field paths on a leading sample, scores every path over the full
/// (bounded) record set, and ranks the paths that qualify as keys.
pub struct PrimaryKeyDetector {
    config: AnalysisConfig,
}

impl PrimaryKeyDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a detector with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an in-memory record set
    pub fn analyze(&self, records: &[Value]) -> AnalysisReport {
        let paths = discover_paths(
            records,
            self.config.discovery_sample_size,
            self.config.max_depth,
        );

        let field_statistics: BTreeMap<FieldPath, FieldStatistics> = paths
            .into_iter()
            .map(|path| {
                let stats = analyze_field(records, &path);
                (path, stats)
            })
            .collect();

        let candidates = rank_candidates(&field_statistics, records.len(), &self.config.thresholds);
        let structure = profile_structure(records, &self.config.facets);

        AnalysisReport {
            source: None,
            record_count: records.len(),
            skipped_lines: 0,
            candidates,
            field_statistics,
            structure,
        }
    }

    /// Analyze records loaded from one input
    pub fn analyze_loaded(&self, loaded: &LoadedRecords) -> AnalysisReport {
        let mut report = self.analyze(&loaded.records);
        report.skipped_lines = loaded.skipped_lines;
        report
    }

    /// Load and analyze one file
    ///
    /// A file without a single decodable record is an error rather than an
    /// empty report.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport, KeyscanError> {
        let loaded = load_records(path, self.config.max_records)?;
        if loaded.is_empty() {
            return Err(KeyscanError::NoRecords {
                path: path.to_path_buf(),
            });
        }

        let mut report = self.analyze_loaded(&loaded);
        report.source = Some(display_name(path));

        tracing::info!(
            file = %path.display(),
            records = report.record_count,
            skipped = report.skipped_lines,
            candidates = report.candidates.len(),
            "Analyzed file"
        );
        Ok(report)
    }

    /// Analyze every file, isolating failures to the file that caused them
    pub fn analyze_files<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let mut batch = BatchReport {
            generated_at: Utc::now(),
            reports: Vec::new(),
            failures: Vec::new(),
        };

        for path in paths {
            let path = path.as_ref();
            match self.analyze_file(path) {
                Ok(report) => batch.reports.push(report),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping file");
                    batch.failures.push(FileFailure {
                        path: path.to_path_buf(),
                        error: e.to_string(),
                    });
                }
            }
        }

        batch
    }
}

impl Default for PrimaryKeyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// File name used to label reports, falling back to the full path
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
