//! Schema-driven validation and normalization for resource configuration
//!
//! A configuration document travels through a fixed pipeline:
//!
//! 1. [`codec::decode`] turns the external representation (a nested
//!    `serde_json::Value`) into a typed [`ObjectValue`], recording every
//!    leaf that cannot be coerced as a [`Violation`].
//! 2. [`normalize::normalize`] fills absent fields from their defaults and
//!    recomputes set hash keys.
//! 3. [`evaluate::evaluate`] checks required fields, conflicts, conditional
//!    requirements and cardinality bounds.
//! 4. [`codec::encode`] renders the canonical, diff-friendly representation.
//!
//! [`Engine`] wires the steps together around an immutable [`Block`] schema.

pub mod codec;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod hash;
pub mod normalize;
pub mod path;
pub mod resolver;
pub mod schema;
pub mod value;
pub mod violation;

pub use config::Options;
pub use diff::{Change, StateDiff};
pub use engine::{Engine, Outcome};
pub use error::{Error, Result, SchemaError};
pub use hash::SetKey;
pub use path::{FieldPath, PathSegment, parse_path};
pub use resolver::{DefaultResolver, EnvResolver, LayeredResolver, MapResolver, NoopResolver};
pub use schema::{Block, DefaultValue, Elem, Kind, SchemaNode};
pub use value::{ConfigValue, ObjectValue, Scalar, SetValue};
pub use violation::{Violation, ViolationKind};
