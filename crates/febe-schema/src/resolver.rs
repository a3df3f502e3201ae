//! Sources for environment-derived defaults
//!
//! Normalisation calls [`DefaultResolver::resolve`] with the source name a
//! field declares (for example `KUBE_HOST`). Resolvers are fast,
//! side-effect-free reads; a source that yields nothing degrades to the
//! field's fallback, never to an error.

use std::collections::HashMap;

/// Looks up named default sources
pub trait DefaultResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<String>;
}

/// Reads the process environment. Empty variables count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvResolver;

impl DefaultResolver for EnvResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

/// Never yields a value
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl DefaultResolver for NoopResolver {
    fn resolve(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Fixed name -> value table
///
/// # Example
///
/// ```
/// use febe_schema::{DefaultResolver, MapResolver};
///
/// let resolver = MapResolver::new().with("KUBE_HOST", "https://10.0.0.1");
/// assert_eq!(resolver.resolve("KUBE_HOST").as_deref(), Some("https://10.0.0.1"));
/// assert_eq!(resolver.resolve("KUBE_TOKEN"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    values: HashMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl From<HashMap<String, String>> for MapResolver {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl DefaultResolver for MapResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Consults several resolvers in order; the first that yields a value wins.
#[derive(Default)]
pub struct LayeredResolver {
    layers: Vec<Box<dyn DefaultResolver>>,
}

impl LayeredResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer consulted after all existing ones
    pub fn layer(mut self, resolver: impl DefaultResolver + 'static) -> Self {
        self.layers.push(Box::new(resolver));
        self
    }
}

impl DefaultResolver for LayeredResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.resolve(name))
    }
}

impl std::fmt::Debug for LayeredResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredResolver")
            .field("layers", &self.layers.len())
            .finish()
    }
}
