//! Field paths
//!
//! Violations and flat encodings address fields with dotted paths from the
//! root of a document.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `spec.cdn.enabled`
//! - List elements by index: `spec.0.timeout_sec` (or `spec[0].timeout_sec`)
//! - Set elements by hash key: `headers.<64 hex digits>`
//!
//! # Examples
//!
//! ```
//! use febe_schema::path::{parse_path, PathSegment};
//!
//! let path = parse_path("spec[0].cdn");
//! assert_eq!(path.segments(), &[
//!     PathSegment::Key("spec".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("cdn".to_string()),
//! ]);
//! assert_eq!(path.to_string(), "spec.0.cdn");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

use crate::hash::SetKey;

/// A segment of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field or map key
    Key(String),
    /// A list element
    Index(usize),
    /// A set element
    Hash(SetKey),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "{idx}"),
            PathSegment::Hash(key) => write!(f, "{key}"),
        }
    }
}

/// A dotted path from the document root. The empty path is the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Path of a named child
    pub fn key(&self, name: &str) -> Self {
        self.push(PathSegment::Key(name.to_string()))
    }

    /// Path of a list element
    pub fn index(&self, idx: usize) -> Self {
        self.push(PathSegment::Index(idx))
    }

    /// Path of a set element
    pub fn hash(&self, key: &SetKey) -> Self {
        self.push(PathSegment::Hash(key.clone()))
    }

    /// Path of a sibling field (same parent, different name)
    pub fn sibling(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        segments.push(PathSegment::Key(name.to_string()));
        Self { segments }
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        parse_path(path)
    }
}

/// Parse a path string into a [`FieldPath`].
///
/// All-digit segments become list indices, 64-digit lowercase hex segments
/// become set keys, anything else is a key. Bracketed indices (`items[0]`)
/// are accepted as well.
pub fn parse_path(path: &str) -> FieldPath {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => flush(&mut current, &mut segments),
            '[' => {
                flush(&mut current, &mut segments);
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut segments);

    FieldPath { segments }
}

fn flush(current: &mut String, segments: &mut Vec<PathSegment>) {
    if current.is_empty() {
        return;
    }
    let text = std::mem::take(current);
    let segment = if text.bytes().all(|b| b.is_ascii_digit()) {
        match text.parse::<usize>() {
            Ok(idx) => PathSegment::Index(idx),
            Err(_) => PathSegment::Key(text),
        }
    } else if let Some(key) = SetKey::from_hex(&text) {
        PathSegment::Hash(key)
    } else {
        PathSegment::Key(text)
    };
    segments.push(segment);
}
