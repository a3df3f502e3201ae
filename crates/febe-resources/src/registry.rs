//! Resource registry
//!
//! Maps resource type names to their definitions.

use std::collections::BTreeMap;

use febe_schema::{Engine, Options};

use crate::error::{Error, Result};
use crate::resource::ResourceDefinition;
use crate::{backend_config, provider};

/// Registry mapping resource names to definitions.
///
/// # Example
///
/// ```
/// use febe_resources::Registry;
///
/// let registry = Registry::with_builtins();
/// let definition = registry.get("backend_config").unwrap();
/// assert_eq!(definition.schema_version, 1);
/// assert!(registry.get("frontend_config").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    resources: BTreeMap<String, ResourceDefinition>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in resources registered.
    ///
    /// Currently registers:
    /// - `backend_config`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(backend_config::definition());
        registry
    }

    /// Register a definition under its own name.
    ///
    /// A definition already registered under that name is replaced.
    pub fn register(&mut self, definition: ResourceDefinition) {
        tracing::debug!(name = %definition.name, "Registering resource");
        self.resources.insert(definition.name.clone(), definition);
    }

    /// Look up a resource definition.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownResource`] when nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&ResourceDefinition> {
        self.resources.get(name).ok_or_else(|| Error::UnknownResource {
            name: name.to_string(),
        })
    }

    /// Build an engine for a registered resource.
    pub fn engine(&self, name: &str, options: Options) -> Result<Engine> {
        self.get(name)?.engine(options)
    }

    /// The provider configuration definition
    pub fn provider(&self) -> ResourceDefinition {
        provider::definition()
    }

    /// Registered resource names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use febe_schema::{Block, SchemaNode};

    #[test]
    fn new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn builtins_include_backend_config() {
        let registry = Registry::with_builtins();
        assert!(registry.contains("backend_config"));
        assert_eq!(registry.names(), vec!["backend_config"]);
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = Registry::with_builtins();
        registry.register(ResourceDefinition::new(
            "backend_config",
            2,
            Block::new().field("a", SchemaNode::int().optional()),
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("backend_config").unwrap().schema_version, 2);
    }

    #[test]
    fn unknown_resource_is_an_error() {
        let registry = Registry::with_builtins();
        assert!(matches!(
            registry.get("frontend_config"),
            Err(Error::UnknownResource { name }) if name == "frontend_config"
        ));
    }
}
