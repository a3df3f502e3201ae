//! Data-driven schema and document loading
//!
//! Format is detected from the file extension:
//! - `.toml` -> TOML
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML
//!
//! Loaded schemas are validated before they are returned.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Block;
use crate::error::{Error, Result};

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
        }
    }

    /// Parse text in this format
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        let parsed = match self {
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::parse(self.name(), message))
    }
}

impl Block {
    /// Parse and validate a schema from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        parse_schema(Format::Json, content)
    }

    /// Parse and validate a schema from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_schema(Format::Toml, content)
    }

    /// Parse and validate a schema from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse_schema(Format::Yaml, content)
    }
}

fn parse_schema(format: Format, content: &str) -> Result<Block> {
    let block: Block = format.parse(content)?;
    block.validate()?;
    Ok(block)
}

/// Load and validate a schema file.
pub fn load_schema(path: &Path) -> Result<Block> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let block = parse_schema(format, &content)?;
    tracing::debug!(?path, fields = block.len(), "Loaded schema");
    Ok(block)
}

/// Load a configuration document as its external representation.
pub fn load_document(path: &Path) -> Result<Value> {
    load_file(path)
}

/// Load any deserialisable type from a file, format by extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    format.parse(&content)
}
