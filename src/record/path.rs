//! Field paths and record resolution
//!
//! A [`FieldPath`] addresses a location inside one record through object-key
//! steps and first-array-element steps. Arrays are only ever addressed at index
//! 0; later elements have no path of their own.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::KeyscanError;

const FIRST_ELEMENT: &str = "[0]";

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Descend into an object member
    Key(String),
    /// Descend into element 0 of a non-empty array
    First,
}

/// Normalized address of a location within a record
///
/// Equality, ordering and hashing use the rendered form (`Legs[0].Tenor`), so
/// sorted collections of paths iterate alphabetically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    steps: Vec<PathStep>,
    rendered: String,
}

impl FieldPath {
    /// The empty path, addressing the record itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path expression such as `Identifier.UPI` or `Legs[0].Tenor`
    pub fn parse(expr: &str) -> Result<Self, KeyscanError> {
        let invalid = |reason: &str| KeyscanError::InvalidPath {
            path: expr.to_string(),
            reason: reason.to_string(),
        };

        if expr.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut path = FieldPath::root();
        for (index, segment) in expr.split('.').enumerate() {
            let mut key = segment;
            let mut first_steps = 0;
            while let Some(rest) = key.strip_suffix(FIRST_ELEMENT) {
                key = rest;
                first_steps += 1;
            }

            if key.contains('[') || key.contains(']') {
                return Err(invalid("only [0] array steps are supported"));
            }
            if key.is_empty() {
                // A leading "[0]" addresses a record that is itself an array
                if !(index == 0 && first_steps > 0) {
                    return Err(invalid("empty key segment"));
                }
            } else {
                path = path.child(key);
            }
            for _ in 0..first_steps {
                path = path.first_element();
            }
        }

        Ok(path)
    }

    /// Extend this path with an object-key step
    pub fn child(&self, key: &str) -> Self {
        let mut rendered = self.rendered.clone();
        if !rendered.is_empty() {
            rendered.push('.');
        }
        rendered.push_str(key);

        let mut steps = self.steps.clone();
        steps.push(PathStep::Key(key.to_string()));
        Self { steps, rendered }
    }

    /// Extend this path with a first-array-element step
    pub fn first_element(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::First);
        Self {
            steps,
            rendered: format!("{}{}", self.rendered, FIRST_ELEMENT),
        }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolve this path against one record
    ///
    /// Returns `None` when a key is missing, or when an array step meets a
    /// non-array or an empty array.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for step in &self.steps {
            current = match step {
                PathStep::Key(key) => current.as_object()?.get(key)?,
                PathStep::First => current.as_array()?.first()?,
            };
        }
        Some(current)
    }

    /// Resolve this path, treating an explicit `null` as absent
    pub fn resolve_present<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.resolve(record).filter(|value| !value.is_null())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for FieldPath {}

impl Hash for FieldPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}

impl PartialOrd for FieldPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered.cmp(&other.rendered)
    }
}

impl std::str::FromStr for FieldPath {
    type Err = KeyscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = KeyscanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.rendered
    }
}

/// Render a resolved value as the string used for equality comparisons
///
/// Strings render as their raw text. Everything else renders as compact JSON
/// with object keys sorted, so structurally equal values always produce the
/// same string regardless of key order.
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => {
            let mut out = String::new();
            write_canonical(other, &mut out);
            out
        }
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}
