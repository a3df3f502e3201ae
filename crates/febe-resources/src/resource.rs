//! Resource definitions

use std::time::Duration;

use febe_schema::{Block, Engine, Options};
use serde::{Serialize, Serializer};

use crate::error::Result;

/// Default timeout for every resource operation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Operation timeouts of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeouts {
    #[serde(serialize_with = "as_secs")]
    pub create: Duration,
    #[serde(serialize_with = "as_secs")]
    pub update: Duration,
    #[serde(serialize_with = "as_secs")]
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: DEFAULT_TIMEOUT,
            update: DEFAULT_TIMEOUT,
            delete: DEFAULT_TIMEOUT,
        }
    }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

/// A named schema together with its version and timeouts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub name: String,
    pub schema_version: u32,
    pub timeouts: Timeouts,
    pub schema: Block,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, schema_version: u32, schema: Block) -> Self {
        Self {
            name: name.into(),
            schema_version,
            timeouts: Timeouts::default(),
            schema,
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build an engine for this resource's schema.
    pub fn engine(&self, options: Options) -> Result<Engine> {
        Ok(Engine::new(self.schema.clone(), options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use febe_schema::SchemaNode;

    #[test]
    fn timeouts_default_to_ten_minutes() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.create, Duration::from_secs(600));
        assert_eq!(timeouts.update, Duration::from_secs(600));
        assert_eq!(timeouts.delete, Duration::from_secs(600));
    }

    #[test]
    fn serializes_timeouts_as_seconds() {
        let definition = ResourceDefinition::new(
            "example",
            2,
            Block::new().field("a", SchemaNode::int().optional()),
        );
        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json["schemaVersion"], 2);
        assert_eq!(json["timeouts"]["create"], 600);
        assert_eq!(json["schema"]["a"]["type"], "int");
    }

    #[test]
    fn engine_rejects_malformed_schema() {
        let definition = ResourceDefinition::new(
            "broken",
            1,
            Block::new().field("a", SchemaNode::int()),
        );
        assert!(definition.engine(Options::default()).is_err());
    }
}
