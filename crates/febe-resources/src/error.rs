//! Error types for febe-resources

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("Invalid schema: {0}")]
    Schema(#[from] febe_schema::SchemaError),
}
