//! Constraint failures reported for a document
//!
//! Violations are data, not errors: every pipeline step collects them and
//! keeps going, so one run reports everything wrong with a document.

use std::fmt;

use serde::Serialize;

use crate::path::FieldPath;

/// What kind of constraint failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    MissingRequired,
    Conflict,
    CardinalityExceeded,
    RequiredWithMissing,
    TypeMismatch,
    UnknownField,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationKind::MissingRequired => "MissingRequired",
            ViolationKind::Conflict => "Conflict",
            ViolationKind::CardinalityExceeded => "CardinalityExceeded",
            ViolationKind::RequiredWithMissing => "RequiredWithMissing",
            ViolationKind::TypeMismatch => "TypeMismatch",
            ViolationKind::UnknownField => "UnknownField",
        };
        f.write_str(name)
    }
}

/// One constraint failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field_path: FieldPath,
    pub kind: ViolationKind,
    pub detail: String,
}

impl Violation {
    pub fn new(field_path: FieldPath, kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            field_path,
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field_path.is_root() {
            write!(f, "[{}] {}", self.kind, self.detail)
        } else {
            write!(f, "{}: [{}] {}", self.field_path, self.kind, self.detail)
        }
    }
}
