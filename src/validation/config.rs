//! Configuration for identifier validation

use serde::{Deserialize, Serialize};

use crate::analysis::FacetSpec;
use crate::record::FieldPath;

/// Configuration for cross-file identifier validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Path of the identifier that must be globally unique
    pub identifier: FieldPath,

    /// Maximum number of identifier-bearing records scanned per file (0 = all)
    pub max_records_per_file: usize,

    /// Number of leading identifier occurrences kept as examples
    pub max_examples: usize,

    /// Classification fields shown alongside each example
    pub example_facets: Vec<FacetSpec>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let header = FieldPath::root().child("Header");
        Self {
            identifier: FieldPath::root().child("Identifier").child("UPI"),
            max_records_per_file: 1000,
            max_examples: 10,
            example_facets: vec![
                FacetSpec::new("asset_class", header.child("AssetClass")),
                FacetSpec::new("instrument_type", header.child("InstrumentType")),
            ],
        }
    }
}

impl ValidationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }
}

/// Builder for ValidationConfig
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Set the identifier path
    pub fn identifier(mut self, path: FieldPath) -> Self {
        self.config.identifier = path;
        self
    }

    /// Set the per-file record cap (0 = all records)
    pub fn max_records_per_file(mut self, max: usize) -> Self {
        self.config.max_records_per_file = max;
        self
    }

    /// Set the number of retained examples
    pub fn max_examples(mut self, max: usize) -> Self {
        self.config.max_examples = max;
        self
    }

    /// Replace the example classification fields
    pub fn example_facets(mut self, facets: Vec<FacetSpec>) -> Self {
        self.config.example_facets = facets;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}
