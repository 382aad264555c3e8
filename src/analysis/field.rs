//! Per-field uniqueness statistics

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{FieldPath, canonical_string};

/// Uniqueness statistics of one field path over a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatistics {
    /// The analyzed path
    pub path: FieldPath,
    /// Records in which the path resolved to a non-null value
    pub total_count: usize,
    /// Distinct resolved values
    pub unique_count: usize,
    /// `unique_count / total_count`, 0 when nothing resolved
    pub uniqueness_ratio: f64,
    /// `total_count / record_count`, 0 for an empty record set
    pub coverage: f64,
}

impl FieldStatistics {
    /// Build statistics from raw counts
    pub fn from_counts(
        path: FieldPath,
        total_count: usize,
        unique_count: usize,
        record_count: usize,
    ) -> Self {
        Self {
            path,
            total_count,
            unique_count,
            uniqueness_ratio: ratio(unique_count, total_count),
            coverage: ratio(total_count, record_count),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compute uniqueness statistics for `path` over `records`
///
/// Records where the path does not resolve, or resolves to `null`, are left
/// out of both counts.
pub fn analyze_field(records: &[Value], path: &FieldPath) -> FieldStatistics {
    let mut total_count = 0;
    let mut distinct: HashSet<String> = HashSet::new();

    for record in records {
        if let Some(value) = path.resolve_present(record) {
            total_count += 1;
            distinct.insert(canonical_string(value));
        }
    }

    let stats = FieldStatistics::from_counts(path.clone(), total_count, distinct.len(), records.len());
    tracing::debug!(
        path = %stats.path,
        total = stats.total_count,
        unique = stats.unique_count,
        ratio = stats.uniqueness_ratio,
        "Analyzed field"
    );
    stats
}
