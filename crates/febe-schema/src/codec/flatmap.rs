//! Flat `key = value` state encoding
//!
//! The host persists state as a flat string map:
//!
//! | Value | Entries |
//! |---|---|
//! | scalar at `a.b` | `a.b = <text>` |
//! | list or set at `a` | `a.# = <count>`, elements at `a.<index>` / `a.<hash>` |
//! | map at `a` | `a.% = <count>`, entries at `a.<key>` |
//! | object at `a` | `a.% = <present field count>`, fields at `a.<name>` |
//!
//! Field names never contain `.`, `#`, `%`, `[` or `]` (schema validation
//! rejects them) and map keys are never `%` (decode rejects it), so no two
//! values share a key. Absent fields produce no entries. [`unflatten`] needs the schema to
//! rebuild the nested form; scalars come back as strings and are coerced
//! again by [`decode`](super::decode).

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::hash::canonical_text;
use crate::schema::{Block, Elem, Kind, SchemaNode};
use crate::value::{ConfigValue, ObjectValue};

/// Flat state: sorted key -> text
pub type FlatMap = BTreeMap<String, String>;

const COUNT: &str = "#";
/// Size marker of maps and objects. A map entry under this key would collide
/// with it, so decode rejects such keys.
pub(crate) const SIZE: &str = "%";

/// Flatten a block instance.
///
/// ```
/// use febe_schema::{ConfigValue, ObjectValue, Scalar};
/// use febe_schema::codec::flatten;
///
/// let spec = ObjectValue::new().with("timeout_sec", Scalar::Int(30));
/// let root = ObjectValue::new().with("spec", ConfigValue::List(vec![spec.into()]));
/// let flat = flatten(&root);
/// assert_eq!(flat["spec.#"], "1");
/// assert_eq!(flat["spec.0.%"], "1");
/// assert_eq!(flat["spec.0.timeout_sec"], "30");
/// ```
pub fn flatten(object: &ObjectValue) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_fields(object, "", &mut flat);
    flat
}

fn flatten_fields(object: &ObjectValue, prefix: &str, flat: &mut FlatMap) {
    for (name, value) in object.iter() {
        flatten_value(value, &join(prefix, name), flat);
    }
}

fn flatten_value(value: &ConfigValue, key: &str, flat: &mut FlatMap) {
    match value {
        ConfigValue::Absent => {}
        ConfigValue::Scalar(scalar) => {
            flat.insert(key.to_string(), scalar.to_string());
        }
        ConfigValue::List(items) => {
            flat.insert(join(key, COUNT), items.len().to_string());
            for (idx, item) in items.iter().enumerate() {
                flatten_value(item, &join(key, &idx.to_string()), flat);
            }
        }
        ConfigValue::Set(set) => {
            flat.insert(join(key, COUNT), set.len().to_string());
            for (hash, item) in set.iter() {
                flatten_value(item, &join(key, hash.as_str()), flat);
            }
        }
        ConfigValue::Map(entries) => {
            flat.insert(join(key, SIZE), entries.len().to_string());
            for (name, item) in entries {
                flatten_value(item, &join(key, name), flat);
            }
        }
        ConfigValue::Object(object) => {
            let present = object.iter().filter(|(_, v)| v.is_present()).count();
            flat.insert(join(key, SIZE), present.to_string());
            flatten_fields(object, key, flat);
        }
        ConfigValue::Mismatched(raw) => {
            flat.insert(key.to_string(), canonical_text(raw));
        }
    }
}

/// Rebuild the nested external form of a flat encoding.
///
/// Keys the schema does not declare are ignored.
pub fn unflatten(schema: &Block, flat: &FlatMap) -> Value {
    Value::Object(unflatten_block(schema, "", flat))
}

fn unflatten_block(block: &Block, prefix: &str, flat: &FlatMap) -> Map<String, Value> {
    block
        .iter()
        .filter_map(|(name, node)| {
            unflatten_field(node, &join(prefix, name), flat).map(|v| (name.to_string(), v))
        })
        .collect()
}

fn unflatten_field(node: &SchemaNode, key: &str, flat: &FlatMap) -> Option<Value> {
    match node.kind {
        kind if kind.is_scalar() => flat.get(key).map(|text| Value::String(text.clone())),
        Kind::List | Kind::Set => {
            flat.get(&join(key, COUNT))?;
            let mut children = child_segments(key, flat);
            children.retain(|segment| segment != COUNT);
            if node.kind == Kind::List {
                let mut indices: Vec<usize> =
                    children.iter().filter_map(|s| s.parse().ok()).collect();
                indices.sort_unstable();
                children = indices.into_iter().map(|i| i.to_string()).collect();
            }
            let items = children
                .iter()
                .filter_map(|segment| unflatten_elem(node.elem.as_ref()?, &join(key, segment), flat))
                .collect();
            Some(Value::Array(items))
        }
        Kind::Map => {
            flat.get(&join(key, SIZE))?;
            let scope = join(key, "");
            let entries = flat
                .range(scope.clone()..)
                .take_while(|(k, _)| k.starts_with(&scope))
                .filter_map(|(k, v)| {
                    let name = &k[scope.len()..];
                    (name != SIZE).then(|| (name.to_string(), Value::String(v.clone())))
                })
                .collect();
            Some(Value::Object(entries))
        }
        Kind::Object => {
            flat.get(&join(key, SIZE))?;
            let block = node.block()?;
            Some(Value::Object(unflatten_block(block, key, flat)))
        }
        _ => None,
    }
}

fn unflatten_elem(elem: &Elem, key: &str, flat: &FlatMap) -> Option<Value> {
    match elem {
        Elem::Block { block } => {
            flat.get(&join(key, SIZE))?;
            Some(Value::Object(unflatten_block(block, key, flat)))
        }
        Elem::Node(node) => unflatten_field(node, key, flat),
    }
}

/// Distinct next segments below `key`, in key order
fn child_segments(key: &str, flat: &FlatMap) -> Vec<String> {
    let scope = join(key, "");
    let segments: BTreeSet<&str> = flat
        .range(scope.clone()..)
        .take_while(|(k, _)| k.starts_with(&scope))
        .filter_map(|(k, _)| k[scope.len()..].split('.').next())
        .collect();
    segments.into_iter().map(str::to_string).collect()
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
