//! Primary key candidate selection and ordering

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::FieldStatistics;
use crate::record::FieldPath;

/// Thresholds a field must meet to be reported as a primary key candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateThresholds {
    /// Minimum uniqueness ratio (inclusive)
    pub min_uniqueness: f64,
    /// Minimum share of records in which the field must resolve (inclusive)
    pub min_coverage: f64,
}

impl Default for CandidateThresholds {
    fn default() -> Self {
        Self {
            min_uniqueness: 0.95,
            min_coverage: 0.9,
        }
    }
}

impl CandidateThresholds {
    /// Whether `stats`, computed over `record_count` records, qualifies
    ///
    /// Fields with at most one distinct value never qualify.
    pub fn accepts(&self, stats: &FieldStatistics, record_count: usize) -> bool {
        stats.uniqueness_ratio >= self.min_uniqueness
            && stats.total_count as f64 >= record_count as f64 * self.min_coverage
            && stats.unique_count > 1
    }
}

/// A field that passed the candidate thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyCandidate {
    /// 1-based position in the ranking
    pub rank: usize,
    #[serde(flatten)]
    pub statistics: FieldStatistics,
}

impl PrimaryKeyCandidate {
    pub fn path(&self) -> &FieldPath {
        &self.statistics.path
    }
}

/// Select and order primary key candidates
///
/// Candidates are sorted by uniqueness ratio, then coverage, both descending.
/// The sort is stable over the alphabetical map order, so remaining ties keep
/// alphabetical path order.
pub fn rank_candidates(
    statistics: &BTreeMap<FieldPath, FieldStatistics>,
    record_count: usize,
    thresholds: &CandidateThresholds,
) -> Vec<PrimaryKeyCandidate> {
    let mut passing: Vec<&FieldStatistics> = statistics
        .values()
        .filter(|stats| thresholds.accepts(stats, record_count))
        .collect();

    passing.sort_by(|a, b| {
        b.uniqueness_ratio
            .total_cmp(&a.uniqueness_ratio)
            .then_with(|| b.coverage.total_cmp(&a.coverage))
    });

    passing
        .into_iter()
        .enumerate()
        .map(|(index, stats)| PrimaryKeyCandidate {
            rank: index + 1,
            statistics: stats.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_map(entries: &[(&str, usize, usize)], record_count: usize) -> BTreeMap<FieldPath, FieldStatistics> {
        entries
            .iter()
            .map(|(path, total, unique)| {
                let path = FieldPath::parse(path).unwrap();
                let stats = FieldStatistics::from_counts(path.clone(), *total, *unique, record_count);
                (path, stats)
            })
            .collect()
    }

    #[test]
    fn test_predicate_boundaries() {
        let thresholds = CandidateThresholds::default();
        let map = stats_map(
            &[
                ("exact", 100, 95),   // ratio exactly 0.95
                ("below", 100, 94),   // ratio 0.94
                ("sparse", 89, 89),   // coverage 0.89
                ("covered", 90, 90),  // coverage exactly 0.9
                ("single", 1, 1),     // one distinct value
            ],
            100,
        );

        let accepted: Vec<&str> = map
            .values()
            .filter(|s| thresholds.accepts(s, 100))
            .map(|s| s.path.as_str())
            .collect();
        assert_eq!(accepted, vec!["covered", "exact"]);
    }

    #[test]
    fn test_single_valued_field_rejected_even_when_fully_unique() {
        let thresholds = CandidateThresholds::default();
        let map = stats_map(&[("only", 1, 1)], 1);
        assert!(!thresholds.accepts(&map[&FieldPath::parse("only").unwrap()], 1));
    }

    #[test]
    fn test_ordering_by_ratio_then_coverage() {
        let map = stats_map(
            &[
                ("a", 96, 92),  // ratio ~0.958, coverage 0.96
                ("b", 95, 95),  // ratio 1.0, coverage 0.95
                ("c", 100, 100), // ratio 1.0, coverage 1.0
            ],
            100,
        );
        let ranked = rank_candidates(&map, 100, &CandidateThresholds::default());
        let order: Vec<&str> = ranked.iter().map(|c| c.path().as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_alphabetical_order() {
        let map = stats_map(
            &[("zeta", 10, 10), ("alpha", 10, 10), ("mid.inner", 10, 10)],
            10,
        );
        let ranked = rank_candidates(&map, 10, &CandidateThresholds::default());
        let order: Vec<&str> = ranked.iter().map(|c| c.path().as_str()).collect();
        assert_eq!(order, vec!["alpha", "mid.inner", "zeta"]);
    }

    #[test]
    fn test_no_candidates_for_empty_statistics() {
        let ranked = rank_candidates(&BTreeMap::new(), 0, &CandidateThresholds::default());
        assert!(ranked.is_empty());
    }
}
