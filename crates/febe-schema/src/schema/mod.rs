//! Schema tree
//!
//! A schema is a [`Block`]: an ordered mapping of field name to
//! [`SchemaNode`]. Nodes of composite kind carry an [`Elem`] describing their
//! elements, so blocks nest to any depth.
//!
//! Schemas are declared once, checked once with [`Block::validate`], and then
//! shared read-only by every validation call. They can be built in code
//! (see [`builder`]) or loaded from JSON, TOML or YAML (see [`loader`]):
//!
//! ```json
//! {
//!   "timeout_sec": { "type": "int", "optional": true, "default": 30 },
//!   "headers": { "type": "set", "optional": true, "elem": { "type": "string" } },
//!   "cdn": {
//!     "type": "object",
//!     "optional": true,
//!     "elem": { "block": { "enabled": { "type": "bool", "optional": true, "default": false } } }
//!   }
//! }
//! ```

pub mod builder;
pub mod check;
pub mod loader;

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Scalar;

/// The shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Int,
    Float,
    Bool,
    List,
    Set,
    Map,
    Object,
}

impl Kind {
    pub fn is_scalar(self) -> bool {
        matches!(self, Kind::String | Kind::Int | Kind::Float | Kind::Bool)
    }

    /// List and set fields, the kinds `max_items` applies to
    pub fn is_collection(self) -> bool {
        matches!(self, Kind::List | Kind::Set)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a default value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Read from a named external source (an environment variable) when the
    /// document is normalised, falling back to `fallback` when the source
    /// yields nothing.
    Env {
        env: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<Scalar>,
    },
    Static(Scalar),
}

/// Element description of a list, set, map or object field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Elem {
    /// Elements are objects with these fields
    Block { block: Block },
    /// Elements are scalars of this node's kind
    Node(Box<SchemaNode>),
}

impl Elem {
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Elem::Block { block } => Some(block),
            Elem::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            Elem::Node(node) => Some(node),
            Elem::Block { .. } => None,
        }
    }
}

impl From<Block> for Elem {
    fn from(block: Block) -> Self {
        Elem::Block { block }
    }
}

impl From<SchemaNode> for Elem {
    fn from(node: SchemaNode) -> Self {
        Elem::Node(Box::new(node))
    }
}

/// Declaration of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// 0 means unbounded
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_items: i64,
    /// Sibling fields that may not be set together with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
    /// Sibling fields that must be set whenever this one is
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_with: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<Elem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl SchemaNode {
    /// A bare node of the given kind with no flags set
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            default: None,
            max_items: 0,
            conflicts_with: Vec::new(),
            required_with: Vec::new(),
            elem: None,
            description: None,
        }
    }

    /// The nested block for objects and lists/sets of objects
    pub fn block(&self) -> Option<&Block> {
        self.elem.as_ref().and_then(Elem::as_block)
    }

    /// The scalar element node for maps and lists/sets of scalars
    pub fn elem_node(&self) -> Option<&SchemaNode> {
        self.elem.as_ref().and_then(Elem::as_node)
    }
}

/// An ordered mapping of field name to declaration.
///
/// Declaration order is the order fields are evaluated and violations are
/// reported in. Duplicate names can be represented so that
/// [`Block::validate`] can reject them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    fields: Vec<(String, SchemaNode)>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field declaration
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.push(name, node);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, node: SchemaNode) {
        self.fields.push((name.into(), node));
    }

    /// First declaration with this name
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every sibling that conflicts with `name`, whichever side declared it.
    ///
    /// Fields `name` declares come first, followed by fields declaring
    /// `name`, each in declaration order and without repeats.
    pub fn conflicts_of(&self, name: &str) -> Vec<&str> {
        let mut result: Vec<&str> = Vec::new();
        if let Some(node) = self.get(name) {
            for target in &node.conflicts_with {
                if !result.contains(&target.as_str()) {
                    result.push(target);
                }
            }
        }
        for (other, node) in self.iter() {
            if other != name
                && node.conflicts_with.iter().any(|t| t == name)
                && !result.contains(&other)
            {
                result.push(other);
            }
        }
        result
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, node) in &self.fields {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = Block;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of field name to field declaration")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Block, A::Error> {
                let mut block = Block::new();
                while let Some((name, node)) = access.next_entry::<String, SchemaNode>()? {
                    block.push(name, node);
                }
                Ok(block)
            }
        }

        deserializer.deserialize_map(BlockVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_symmetric_when_declared_once() {
        let block = Block::new()
            .field("a", SchemaNode::string().optional().conflicts_with(["b"]))
            .field("b", SchemaNode::string().optional());
        assert_eq!(block.conflicts_of("a"), vec!["b"]);
        assert_eq!(block.conflicts_of("b"), vec!["a"]);
    }

    #[test]
    fn conflicts_do_not_repeat_when_declared_twice() {
        let block = Block::new()
            .field("a", SchemaNode::string().optional().conflicts_with(["b"]))
            .field("b", SchemaNode::string().optional().conflicts_with(["a"]));
        assert_eq!(block.conflicts_of("a"), vec!["b"]);
        assert_eq!(block.conflicts_of("b"), vec!["a"]);
    }

    #[test]
    fn block_preserves_declaration_order() {
        let block = Block::new()
            .field("zeta", SchemaNode::int().optional())
            .field("alpha", SchemaNode::int().optional());
        let names: Vec<&str> = block.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn serialize_skips_unset_flags() {
        let node = SchemaNode::int().optional().default(30);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "int", "optional": true, "default": 30})
        );
    }
}
