//! Settings file for the CLI
//!
//! Optional; its format follows the file extension like documents do.
//!
//! ```toml
//! [engine]
//! reject_unknown_fields = false
//!
//! [defaults]
//! KUBE_HOST = "https://127.0.0.1:6443"
//! ```

use std::collections::HashMap;
use std::path::Path;

use febe_schema::schema::loader::load_file;
use febe_schema::{EnvResolver, LayeredResolver, MapResolver, Options};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: Options,
    /// Default sources consulted before the process environment
    pub defaults: HashMap<String, String>,
}

impl Settings {
    /// Load settings from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let settings: Settings = load_file(path)?;
        tracing::debug!(
            ?path,
            defaults = settings.defaults.len(),
            reject_unknown_fields = settings.engine.reject_unknown_fields,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Resolver for environment-derived defaults: `defaults` first, then
    /// the process environment.
    pub fn resolver(&self) -> LayeredResolver {
        LayeredResolver::new()
            .layer(MapResolver::from(self.defaults.clone()))
            .layer(EnvResolver)
    }
}
