//! Error types for febe-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Schema or document loading error
    #[error(transparent)]
    Schema(#[from] febe_schema::Error),

    /// Malformed schema declaration
    #[error(transparent)]
    Declaration(#[from] febe_schema::SchemaError),

    /// Resource lookup error
    #[error(transparent)]
    Resources(#[from] febe_resources::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The document was processed but has violations
    #[error("{file} has {count} violation(s)")]
    Invalid { file: String, count: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
