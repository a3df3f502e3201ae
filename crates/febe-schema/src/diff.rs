//! Drift detection between two canonical encodings

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};

use crate::codec::FlatMap;
use crate::path::FieldPath;

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 128;

/// Result of comparing two encodings of the same resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDiff {
    /// Do the encodings describe the same configuration?
    pub is_equivalent: bool,
    /// Changes in traversal order
    pub changes: Vec<Change>,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
}

impl StateDiff {
    /// Create a diff indicating no drift
    pub fn equivalent() -> Self {
        Self {
            is_equivalent: true,
            changes: Vec::new(),
            similarity: 1.0,
        }
    }

    /// Create a diff with changes
    pub fn with_changes(changes: Vec<Change>, similarity: f64) -> Self {
        Self {
            is_equivalent: changes.is_empty(),
            changes,
            similarity,
        }
    }

    /// Compare two nested encodings.
    ///
    /// Paths use the same dotted form as violations (`spec.0.cdn.enabled`).
    /// Both sides should come from [`encode`](crate::codec::encode) so sets
    /// are already in canonical order.
    pub fn compute(old: &Value, new: &Value) -> Self {
        if old == new {
            return Self::equivalent();
        }
        let mut changes = Vec::new();
        diff_values(old, new, FieldPath::root(), &mut changes, 0);
        Self::with_changes(changes, value_similarity(old, new))
    }

    /// Compare two flat encodings key by key.
    pub fn compute_flat(old: &FlatMap, new: &FlatMap) -> Self {
        if old == new {
            return Self::equivalent();
        }

        let mut changes = Vec::new();
        for (key, old_value) in old {
            match new.get(key) {
                Some(new_value) if new_value != old_value => changes.push(Change::Modified {
                    path: key.as_str().into(),
                    old: Value::String(old_value.clone()),
                    new: Value::String(new_value.clone()),
                }),
                Some(_) => {}
                None => changes.push(Change::Removed {
                    path: key.as_str().into(),
                    value: Value::String(old_value.clone()),
                }),
            }
        }
        for (key, new_value) in new {
            if !old.contains_key(key) {
                changes.push(Change::Added {
                    path: key.as_str().into(),
                    value: Value::String(new_value.clone()),
                });
            }
        }

        let old_text = flat_text(old);
        let new_text = flat_text(new);
        let similarity = TextDiff::from_lines(&old_text, &new_text).ratio() as f64;
        Self::with_changes(changes, similarity)
    }

    /// Number of changed lines when the flat encodings are compared as text
    pub fn changed_lines(old: &FlatMap, new: &FlatMap) -> usize {
        let old_text = flat_text(old);
        let new_text = flat_text(new);
        TextDiff::from_lines(&old_text, &new_text)
            .iter_all_changes()
            .filter(|change| change.tag() != ChangeTag::Equal)
            .count()
    }
}

impl Default for StateDiff {
    fn default() -> Self {
        Self::equivalent()
    }
}

/// One difference between two encodings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum Change {
    /// Path present only in the new encoding
    Added { path: FieldPath, value: Value },
    /// Path present only in the old encoding
    Removed { path: FieldPath, value: Value },
    /// Value changed at path
    Modified {
        path: FieldPath,
        old: Value,
        new: Value,
    },
}

impl Change {
    pub fn path(&self) -> &FieldPath {
        match self {
            Change::Added { path, .. } | Change::Removed { path, .. } | Change::Modified { path, .. } => path,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { path, value } => write!(f, "+ {path} = {value}"),
            Change::Removed { path, value } => write!(f, "- {path} = {value}"),
            Change::Modified { path, old, new } => write!(f, "~ {path}: {old} -> {new}"),
        }
    }
}

fn diff_values(old: &Value, new: &Value, path: FieldPath, changes: &mut Vec<Change>, depth: usize) {
    // Too deep: report the whole subtree as one modification
    if depth > MAX_DIFF_DEPTH {
        if old != new {
            changes.push(Change::Modified {
                path,
                old: old.clone(),
                new: new.clone(),
            });
        }
        return;
    }

    match (old, new) {
        (Value::Object(old_obj), Value::Object(new_obj)) => {
            for (key, old_value) in old_obj {
                match new_obj.get(key) {
                    Some(new_value) => {
                        diff_values(old_value, new_value, path.key(key), changes, depth + 1);
                    }
                    None => changes.push(Change::Removed {
                        path: path.key(key),
                        value: old_value.clone(),
                    }),
                }
            }
            for (key, new_value) in new_obj {
                if !old_obj.contains_key(key) {
                    changes.push(Change::Added {
                        path: path.key(key),
                        value: new_value.clone(),
                    });
                }
            }
        }
        (Value::Array(old_arr), Value::Array(new_arr)) => {
            let max_len = old_arr.len().max(new_arr.len());
            for i in 0..max_len {
                match (old_arr.get(i), new_arr.get(i)) {
                    (Some(old_val), Some(new_val)) => {
                        diff_values(old_val, new_val, path.index(i), changes, depth + 1);
                    }
                    (Some(old_val), None) => changes.push(Change::Removed {
                        path: path.index(i),
                        value: old_val.clone(),
                    }),
                    (None, Some(new_val)) => changes.push(Change::Added {
                        path: path.index(i),
                        value: new_val.clone(),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if old != new {
                changes.push(Change::Modified {
                    path,
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
    }
}

fn value_similarity(old: &Value, new: &Value) -> f64 {
    let old_str = crate::hash::canonical_text(old);
    let new_str = crate::hash::canonical_text(new);
    TextDiff::from_chars(&old_str, &new_str).ratio() as f64
}

fn flat_text(flat: &FlatMap) -> String {
    flat.iter().map(|(k, v)| format!("{k} = {v}\n")).collect()
}
