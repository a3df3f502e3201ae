//! Error types for febe-schema

use std::path::PathBuf;

/// Result type for febe-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed schema declaration.
///
/// Raised once, when a schema is checked before any document is processed.
/// These are programmer errors and are not recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Duplicate field {name:?} in block at {path:?}")]
    DuplicateField { path: String, name: String },

    #[error("Field {path} of kind {kind} has no elem")]
    MissingElem { path: String, kind: String },

    #[error("Field {path} has an invalid elem: {message}")]
    InvalidElem { path: String, message: String },

    #[error("Field {path}: {relation} entry {target:?} {reason}")]
    InvalidReference {
        path: String,
        relation: &'static str,
        target: String,
        reason: &'static str,
    },

    #[error("Field {path} has invalid max_items {max_items}: {reason}")]
    InvalidMaxItems {
        path: String,
        max_items: i64,
        reason: &'static str,
    },

    #[error("Field {path} {message}")]
    InvalidPresence { path: String, message: String },

    #[error("Field {path} has an invalid default: {message}")]
    InvalidDefault { path: String, message: String },

    #[error("Invalid field name {name:?} in block at {path:?}: {reason}")]
    InvalidFieldName {
        path: String,
        name: String,
        reason: &'static str,
    },
}

/// Errors that can occur while loading schemas or documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to parse {format} content: {message}")]
    Parse { format: String, message: String },

    #[error("Unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
