//! Lightweight structure summary of a record set

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{FieldPath, canonical_string};

/// A categorical field whose values are counted by the structure profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSpec {
    /// Report label (also the CSV column name)
    pub name: String,
    /// Location of the categorical value within a record
    pub path: FieldPath,
}

impl FacetSpec {
    pub fn new(name: &str, path: FieldPath) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }
}

/// The classification attributes carried under a trade record's `Header`
pub fn default_facets() -> Vec<FacetSpec> {
    let header = FieldPath::root().child("Header");
    vec![
        FacetSpec::new("asset_classes", header.child("AssetClass")),
        FacetSpec::new("instrument_types", header.child("InstrumentType")),
        FacetSpec::new("use_cases", header.child("UseCase")),
    ]
}

/// Value counts of one facet, most frequent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCounts {
    pub name: String,
    pub path: FieldPath,
    pub values: Vec<(String, usize)>,
}

impl FacetCounts {
    /// Distinct values in frequency order
    pub fn value_names(&self) -> Vec<&str> {
        self.values.iter().map(|(value, _)| value.as_str()).collect()
    }
}

/// Descriptive summary of a record set's shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureProfile {
    /// Top-level keys with the number of records exposing them, most frequent first
    pub top_level_fields: Vec<(String, usize)>,
    /// Keys of the first record
    pub sample_keys: Vec<String>,
    /// Counts for each configured facet
    pub facets: Vec<FacetCounts>,
}

impl StructureProfile {
    /// Top-level key names in frequency order
    pub fn top_level_names(&self) -> Vec<&str> {
        self.top_level_fields
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn facet(&self, name: &str) -> Option<&FacetCounts> {
        self.facets.iter().find(|facet| facet.name == name)
    }
}

/// Counter that keeps first-seen order for equal counts
#[derive(Default)]
struct OrderedCounter {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl OrderedCounter {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    fn most_common(mut self) -> Vec<(String, usize)> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
    }
}

/// Summarize top-level keys and facet values across `records`
pub fn profile_structure(records: &[Value], facets: &[FacetSpec]) -> StructureProfile {
    let mut top_level = OrderedCounter::default();
    let mut facet_counters: Vec<OrderedCounter> =
        facets.iter().map(|_| OrderedCounter::default()).collect();

    for record in records {
        if let Some(map) = record.as_object() {
            for key in map.keys() {
                top_level.add(key);
            }
        }

        for (spec, counter) in facets.iter().zip(facet_counters.iter_mut()) {
            if let Some(value) = spec.path.resolve_present(record) {
                counter.add(&canonical_string(value));
            }
        }
    }

    let sample_keys = records
        .first()
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();

    StructureProfile {
        top_level_fields: top_level.most_common(),
        sample_keys,
        facets: facets
            .iter()
            .zip(facet_counters)
            .map(|(spec, counter)| FacetCounts {
                name: spec.name.clone(),
                path: spec.path.clone(),
                values: counter.most_common(),
            })
            .collect(),
    }
}
