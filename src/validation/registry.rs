//! Duplicate tracking across an entire validation run

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a record was read from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    /// 1-based line number
    pub line: usize,
}

impl Location {
    pub fn new(file: &str, line: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:line_{}", self.file, self.line)
    }
}

/// One identifier value that occurred more than once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateEntry {
    pub value: String,
    /// Every occurrence after the first, in scan order
    pub locations: Vec<Location>,
}

/// Every identifier seen so far, and where repeats occurred
///
/// Only grows. The first occurrence of a value is never listed as one of its
/// duplicates.
#[derive(Debug, Default)]
pub struct DuplicateRegistry {
    seen: HashSet<String>,
    duplicates: HashMap<String, Vec<Location>>,
    /// Values in order of their first repeat
    order: Vec<String>,
}

impl DuplicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one occurrence; returns `true` when the value was seen before
    pub fn record(&mut self, value: &str, location: Location) -> bool {
        if !self.seen.contains(value) {
            self.seen.insert(value.to_string());
            return false;
        }

        match self.duplicates.get_mut(value) {
            Some(locations) => locations.push(location),
            None => {
                self.order.push(value.to_string());
                self.duplicates.insert(value.to_string(), vec![location]);
            }
        }
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    /// Number of distinct values observed
    pub fn distinct_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of values that occurred more than once
    pub fn duplicate_count(&self) -> usize {
        self.order.len()
    }

    /// `true` when no value has repeated
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Repeat locations of `value`
    pub fn locations(&self, value: &str) -> Option<&[Location]> {
        self.duplicates.get(value).map(Vec::as_slice)
    }

    /// Duplicated values in order of their first repeat
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Location])> {
        self.order
            .iter()
            .filter_map(|value| self.locations(value).map(|locations| (value.as_str(), locations)))
    }

    /// Every distinct value observed, in no particular order
    pub fn observed(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }
}
