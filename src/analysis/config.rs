//! Configuration for primary key analysis

use serde::{Deserialize, Serialize};

use super::profile::{FacetSpec, default_facets};
use super::ranker::CandidateThresholds;

/// Configuration for primary key analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Maximum number of records loaded per file (0 = all)
    pub max_records: usize,

    /// Number of leading records walked to discover field paths
    pub discovery_sample_size: usize,

    /// Maximum nesting depth walked during path discovery
    /// Deeper nodes are treated as leaves
    pub max_depth: usize,

    /// Primary key candidate thresholds
    pub thresholds: CandidateThresholds,

    /// Categorical fields summarized by the structure profile
    pub facets: Vec<FacetSpec>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_records: 500,
            discovery_sample_size: 10,
            max_depth: 64,
            thresholds: CandidateThresholds::default(),
            facets: default_facets(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Set the per-file record cap (0 = all records)
    pub fn max_records(mut self, max: usize) -> Self {
        self.config.max_records = max;
        self
    }

    /// Set how many leading records are used for path discovery
    pub fn discovery_sample_size(mut self, size: usize) -> Self {
        self.config.discovery_sample_size = size;
        self
    }

    /// Set the maximum traversal depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the minimum uniqueness ratio for candidates
    pub fn min_uniqueness(mut self, ratio: f64) -> Self {
        self.config.thresholds.min_uniqueness = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum coverage for candidates
    pub fn min_coverage(mut self, ratio: f64) -> Self {
        self.config.thresholds.min_coverage = ratio.clamp(0.0, 1.0);
        self
    }

    /// Replace the profiled facets
    pub fn facets(mut self, facets: Vec<FacetSpec>) -> Self {
        self.config.facets = facets;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}
