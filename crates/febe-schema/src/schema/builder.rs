//! Fluent construction of schema nodes
//!
//! ```
//! use febe_schema::{Block, SchemaNode};
//!
//! let cache_policy = Block::new()
//!     .field("include_host", SchemaNode::bool().optional())
//!     .field(
//!         "query_string_blacklist",
//!         SchemaNode::set(SchemaNode::string())
//!             .optional()
//!             .conflicts_with(["query_string_whitelist"]),
//!     )
//!     .field(
//!         "query_string_whitelist",
//!         SchemaNode::set(SchemaNode::string())
//!             .optional()
//!             .conflicts_with(["query_string_blacklist"]),
//!     );
//!
//! let schema = Block::new()
//!     .field("timeout_sec", SchemaNode::int().optional().default(30))
//!     .field("cache_policy", SchemaNode::object(cache_policy).optional());
//!
//! assert!(schema.validate().is_ok());
//! ```

use super::{Block, DefaultValue, Elem, Kind, SchemaNode};
use crate::value::Scalar;

impl SchemaNode {
    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    pub fn int() -> Self {
        Self::new(Kind::Int)
    }

    pub fn float() -> Self {
        Self::new(Kind::Float)
    }

    pub fn bool() -> Self {
        Self::new(Kind::Bool)
    }

    /// An ordered list of scalars (pass a node) or objects (pass a block)
    pub fn list(elem: impl Into<Elem>) -> Self {
        Self::new(Kind::List).elem(elem)
    }

    /// An unordered set of scalars or objects
    pub fn set(elem: impl Into<Elem>) -> Self {
        Self::new(Kind::Set).elem(elem)
    }

    /// String-keyed map of scalars
    pub fn map(elem: SchemaNode) -> Self {
        Self::new(Kind::Map).elem(elem)
    }

    /// A single nested block
    pub fn object(block: Block) -> Self {
        Self::new(Kind::Object).elem(block)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Static default, applied when the field is absent
    pub fn default(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Declare the default only when `condition` holds
    pub fn default_if(self, condition: bool, value: impl Into<Scalar>) -> Self {
        if condition { self.default(value) } else { self }
    }

    /// Default read from the named source, absent when the source is unset
    pub fn default_env(mut self, name: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Env {
            env: name.into(),
            fallback: None,
        });
        self
    }

    /// Default read from the named source, `fallback` when the source is unset
    pub fn default_env_or(mut self, name: impl Into<String>, fallback: impl Into<Scalar>) -> Self {
        self.default = Some(DefaultValue::Env {
            env: name.into(),
            fallback: Some(fallback.into()),
        });
        self
    }

    pub fn max_items(mut self, max_items: i64) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn conflicts_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts_with.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn required_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_with.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn elem(mut self, elem: impl Into<Elem>) -> Self {
        self.elem = Some(elem.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
