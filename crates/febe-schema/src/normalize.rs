//! Default injection and set canonicalization
//!
//! Walks the schema depth-first. Present composites are descended into
//! before anything else happens at their level; absent composites are left
//! alone, so their children's defaults never materialize a parent the user
//! did not write. Absent fields with a declared default take it; present
//! fields, zero values included, are never touched.
//!
//! Normalization is idempotent: a second pass finds nothing absent that has
//! a default and every set already keyed by its current contents.

use crate::path::FieldPath;
use crate::resolver::DefaultResolver;
use crate::schema::{Block, DefaultValue, Elem, SchemaNode};
use crate::value::{ConfigValue, ObjectValue, Scalar};

/// Normalize a decoded block instance in place.
pub fn normalize(schema: &Block, object: &mut ObjectValue, resolver: &dyn DefaultResolver) {
    normalize_block(schema, object, resolver, &FieldPath::root());
}

fn normalize_block(
    block: &Block,
    object: &mut ObjectValue,
    resolver: &dyn DefaultResolver,
    path: &FieldPath,
) {
    for (name, node) in block.iter() {
        let field_path = path.key(name);
        if object.get_mut(name).is_none() {
            object.insert(name, ConfigValue::Absent);
        }
        let Some(value) = object.get_mut(name) else {
            continue;
        };

        if value.is_present() {
            normalize_value(node, value, resolver, &field_path);
        } else if let Some(default) = resolve_default(node, resolver, &field_path) {
            tracing::trace!(field = %field_path, value = %default, "Applied default");
            *value = ConfigValue::Scalar(default);
        }
    }
}

fn normalize_value(
    node: &SchemaNode,
    value: &mut ConfigValue,
    resolver: &dyn DefaultResolver,
    path: &FieldPath,
) {
    match value {
        ConfigValue::Object(object) => {
            if let Some(block) = node.block() {
                normalize_block(block, object, resolver, path);
            }
        }
        ConfigValue::List(items) => {
            for (idx, item) in items.iter_mut().enumerate() {
                normalize_elem(node.elem.as_ref(), item, resolver, &path.index(idx));
            }
        }
        ConfigValue::Set(set) => {
            for item in set.values_mut() {
                normalize_elem(node.elem.as_ref(), item, resolver, path);
            }
            set.rehash();
        }
        _ => {}
    }
}

fn normalize_elem(
    elem: Option<&Elem>,
    item: &mut ConfigValue,
    resolver: &dyn DefaultResolver,
    path: &FieldPath,
) {
    match (elem, item) {
        (Some(Elem::Block { block }), ConfigValue::Object(object)) => {
            normalize_block(block, object, resolver, path);
        }
        (Some(Elem::Node(inner)), item) => normalize_value(inner, item, resolver, path),
        _ => {}
    }
}

/// The value a field's default yields right now, if any.
///
/// Environment-derived values that cannot be read as the field's kind fall
/// back to the declared fallback.
pub fn resolve_default(
    node: &SchemaNode,
    resolver: &dyn DefaultResolver,
    path: &FieldPath,
) -> Option<Scalar> {
    match node.default.as_ref()? {
        DefaultValue::Static(scalar) => coerce_to(node, scalar),
        DefaultValue::Env { env, fallback } => {
            if let Some(text) = resolver.resolve(env) {
                match Scalar::parse(node.kind, &text) {
                    Some(value) => return Some(value),
                    None => tracing::warn!(
                        field = %path,
                        source = %env,
                        "Cannot read {:?} as {}, using fallback",
                        text,
                        node.kind
                    ),
                }
            }
            fallback.as_ref().and_then(|scalar| coerce_to(node, scalar))
        }
    }
}

fn coerce_to(node: &SchemaNode, scalar: &Scalar) -> Option<Scalar> {
    if scalar.kind() == node.kind {
        Some(scalar.clone())
    } else {
        Scalar::coerce(node.kind, &scalar.to_json())
    }
}
