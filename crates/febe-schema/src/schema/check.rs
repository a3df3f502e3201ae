//! Startup-time validation of schema declarations

use std::collections::HashSet;

use super::{Block, DefaultValue, Elem, Kind, SchemaNode};
use crate::error::SchemaError;
use crate::path::FieldPath;
use crate::value::Scalar;

impl Block {
    /// Check the declaration tree for structural mistakes.
    ///
    /// Rejects empty or path-breaking field names, duplicate field names,
    /// composite kinds without an `elem`, elems that do not fit their kind,
    /// `conflicts_with`/`required_with` entries that do not name a
    /// sibling, negative or misplaced
    /// `max_items`, fields that are both or neither required and optional,
    /// and defaults that are misplaced or of the wrong type.
    ///
    /// The first problem found, in declaration order, is returned.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_block(self, &FieldPath::root())
    }
}

/// Characters that separate or mark segments of a field path
const RESERVED_CHARS: &[char] = &['.', '#', '%', '[', ']'];

fn check_block(block: &Block, path: &FieldPath) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for (name, _) in block.iter() {
        check_name(name, path)?;
        if !seen.insert(name) {
            return Err(SchemaError::DuplicateField {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }

    for (name, node) in block.iter() {
        let field_path = path.key(name);
        check_presence(node, &field_path)?;
        check_node(node, &field_path)?;
        check_references(block, name, node, &field_path)?;
    }
    Ok(())
}

fn check_name(name: &str, path: &FieldPath) -> Result<(), SchemaError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.contains(RESERVED_CHARS) {
        "must not contain '.', '#', '%', '[' or ']'"
    } else {
        return Ok(());
    };
    Err(SchemaError::InvalidFieldName {
        path: path.to_string(),
        name: name.to_string(),
        reason,
    })
}

fn check_presence(node: &SchemaNode, path: &FieldPath) -> Result<(), SchemaError> {
    let message = match (node.required, node.optional) {
        (true, true) => "is both required and optional",
        (false, false) => "must be either required or optional",
        _ => return Ok(()),
    };
    Err(SchemaError::InvalidPresence {
        path: path.to_string(),
        message: message.to_string(),
    })
}

fn check_node(node: &SchemaNode, path: &FieldPath) -> Result<(), SchemaError> {
    if node.max_items < 0 {
        return Err(SchemaError::InvalidMaxItems {
            path: path.to_string(),
            max_items: node.max_items,
            reason: "must not be negative",
        });
    }
    if node.max_items > 0 && !node.kind.is_collection() {
        return Err(SchemaError::InvalidMaxItems {
            path: path.to_string(),
            max_items: node.max_items,
            reason: "only applies to list and set fields",
        });
    }

    if let Some(default) = &node.default {
        check_default(node, default, path)?;
    }

    check_elem(node, path)
}

fn check_default(
    node: &SchemaNode,
    default: &DefaultValue,
    path: &FieldPath,
) -> Result<(), SchemaError> {
    let invalid = |message: String| SchemaError::InvalidDefault {
        path: path.to_string(),
        message,
    };

    if node.required {
        return Err(invalid("required fields cannot have defaults".into()));
    }
    if !node.kind.is_scalar() {
        return Err(invalid(format!(
            "only scalar fields can have defaults, found {}",
            node.kind
        )));
    }

    let value = match default {
        DefaultValue::Static(value) => Some(value),
        DefaultValue::Env { env, fallback } => {
            if env.is_empty() {
                return Err(invalid("source name must not be empty".into()));
            }
            fallback.as_ref()
        }
    };
    if let Some(value) = value {
        if Scalar::coerce(node.kind, &value.to_json()).is_none() {
            return Err(invalid(format!(
                "{} value {value:?} does not fit kind {}",
                value.kind(),
                node.kind
            )));
        }
    }
    Ok(())
}

fn check_elem(node: &SchemaNode, path: &FieldPath) -> Result<(), SchemaError> {
    let invalid = |message: &str| SchemaError::InvalidElem {
        path: path.to_string(),
        message: message.to_string(),
    };

    let Some(elem) = &node.elem else {
        if node.kind.is_scalar() {
            return Ok(());
        }
        return Err(SchemaError::MissingElem {
            path: path.to_string(),
            kind: node.kind.to_string(),
        });
    };

    match (node.kind, elem) {
        (kind, _) if kind.is_scalar() => Err(invalid("scalar fields cannot declare an elem")),
        (Kind::Object, Elem::Block { block }) => check_block(block, path),
        (Kind::Object, Elem::Node(_)) => Err(invalid("object elem must be a block")),
        (Kind::Map, Elem::Node(inner)) if inner.kind.is_scalar() => Ok(()),
        (Kind::Map, _) => Err(invalid("map elem must be a scalar node")),
        (_, Elem::Block { block }) => check_block(block, path),
        (_, Elem::Node(inner)) if inner.kind.is_scalar() => Ok(()),
        (_, Elem::Node(_)) => Err(invalid("collection elem must be a scalar node or a block")),
    }
}

fn check_references(
    block: &Block,
    name: &str,
    node: &SchemaNode,
    path: &FieldPath,
) -> Result<(), SchemaError> {
    let relations = [
        ("conflicts_with", &node.conflicts_with),
        ("required_with", &node.required_with),
    ];
    for (relation, targets) in relations {
        for target in targets {
            let reason = if target == name {
                "refers to the field itself"
            } else if !block.contains(target) {
                "is not a sibling field"
            } else {
                continue;
            };
            return Err(SchemaError::InvalidReference {
                path: path.to_string(),
                relation,
                target: target.clone(),
                reason,
            });
        }
    }
    Ok(())
}
