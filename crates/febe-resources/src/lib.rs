//! Declarative schemas for the resources febe validates
//!
//! Everything here is data: the `backend_config` resource, its `metadata`
//! block, the provider configuration, and a [`Registry`] to look them up by
//! name. The behaviour lives in `febe-schema`.

pub mod backend_config;
pub mod error;
pub mod metadata;
pub mod provider;
pub mod registry;
pub mod resource;

pub use error::{Error, Result};
pub use registry::Registry;
pub use resource::{ResourceDefinition, Timeouts};
