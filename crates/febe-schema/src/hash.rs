//! Canonical hashing for set elements and encoded documents
//!
//! Hashes are SHA-256 over the RFC 8785 canonical JSON text of a value's
//! encoded form, so they depend only on content and never on the iteration
//! order of any map.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::codec::encode::encode_value;
use crate::value::ConfigValue;

/// Prefix for document checksums
const PREFIX: &str = "sha256:";

/// Hash key of one set element, rendered as 64 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetKey(String);

impl SetKey {
    /// Compute the key for an element from its canonical encoding.
    pub fn of(value: &ConfigValue) -> Self {
        let encoded = encode_value(value).unwrap_or(Value::Null);
        Self(hex_digest(&canonical_text(&encoded)))
    }

    /// Accept a previously rendered key.
    ///
    /// ```
    /// use febe_schema::SetKey;
    ///
    /// assert!(SetKey::from_hex(&"a".repeat(64)).is_some());
    /// assert!(SetKey::from_hex("not-a-hash").is_none());
    /// ```
    pub fn from_hex(text: &str) -> Option<Self> {
        let valid = text.len() == 64
            && text
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical JSON text of a value (sorted keys, no insignificant whitespace).
pub fn canonical_text(value: &Value) -> String {
    serde_jcs::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Checksum of an encoded document in the form `"sha256:<hex>"`.
///
/// Two encodings with the same checksum are byte-identical once
/// canonicalised, which is what the host compares to detect drift.
pub fn document_checksum(encoded: &Value) -> String {
    format!("{}{}", PREFIX, hex_digest(&canonical_text(encoded)))
}

fn hex_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
