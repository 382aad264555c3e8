//! Run configuration file
//!
//! A single TOML document carries both the analysis and the validation
//! settings. Every key is optional and falls back to the built-in default.
//!
//! ```toml
//! [analysis]
//! maxRecords = 200
//! thresholds = { minUniqueness = 0.99, minCoverage = 0.8 }
//!
//! [validation]
//! identifier = "Identifier.UPI"
//! maxRecordsPerFile = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::error::KeyscanError;
use crate::validation::ValidationConfig;

/// Settings for both passes of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyscanConfig {
    pub analysis: AnalysisConfig,
    pub validation: ValidationConfig,
}

impl KeyscanConfig {
    /// Parse a configuration document
    pub fn from_toml_str(content: &str) -> Result<Self, KeyscanError> {
        let config: Self =
            toml::from_str(content).map_err(|e| KeyscanError::InvalidConfig(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, KeyscanError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| KeyscanError::file_access(path, e))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    fn check(&self) -> Result<(), KeyscanError> {
        let thresholds = &self.analysis.thresholds;
        for (name, value) in [
            ("minUniqueness", thresholds.min_uniqueness),
            ("minCoverage", thresholds.min_coverage),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(KeyscanError::InvalidConfig(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.analysis.discovery_sample_size == 0 {
            return Err(KeyscanError::InvalidConfig(
                "discoverySampleSize must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
