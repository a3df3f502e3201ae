//! External representation -> value model
//!
//! Decoding never stops at the first problem. Every leaf that cannot be
//! coerced produces a `TypeMismatch` violation and is kept as
//! [`ConfigValue::Mismatched`], and decoding carries on through the rest of
//! the document.

use serde_json::{Map, Value};

use super::flatmap::SIZE;
use crate::config::Options;
use crate::path::FieldPath;
use crate::schema::{Block, Elem, Kind, SchemaNode};
use crate::value::{ConfigValue, ObjectValue, Scalar, SetValue};
use crate::violation::{Violation, ViolationKind};

/// Result of decoding one document
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Every field the schema declares, absent ones included
    pub value: ObjectValue,
    /// Type mismatches and unknown fields, in traversal order
    pub violations: Vec<Violation>,
}

/// Decode a document against its schema.
///
/// `null` counts as absent. A root that is not a mapping is reported at the
/// empty path and decoded as if it were empty.
pub fn decode(schema: &Block, input: &Value, options: &Options) -> Decoded {
    let mut decoder = Decoder {
        options,
        violations: Vec::new(),
    };
    let root = FieldPath::root();
    let empty = Map::new();
    let fields = match input {
        Value::Object(fields) => fields,
        Value::Null => &empty,
        other => {
            decoder.mismatch(&root, "a mapping", other);
            &empty
        }
    };
    let value = decoder.block(schema, fields, &root);
    Decoded {
        value,
        violations: decoder.violations,
    }
}

struct Decoder<'a> {
    options: &'a Options,
    violations: Vec<Violation>,
}

impl Decoder<'_> {
    fn block(&mut self, block: &Block, input: &Map<String, Value>, path: &FieldPath) -> ObjectValue {
        let mut object = ObjectValue::new();
        for (name, node) in block.iter() {
            let raw = input.get(name).unwrap_or(&Value::Null);
            let value = self.field(node, raw, &path.key(name));
            object.insert(name, value);
        }

        if self.options.reject_unknown_fields {
            for key in input.keys().filter(|key| !block.contains(key)) {
                self.violations.push(Violation::new(
                    path.key(key),
                    ViolationKind::UnknownField,
                    "field is not declared by the schema",
                ));
            }
        }
        object
    }

    fn field(&mut self, node: &SchemaNode, raw: &Value, path: &FieldPath) -> ConfigValue {
        if raw.is_null() {
            return ConfigValue::Absent;
        }

        match (node.kind, raw) {
            (kind, _) if kind.is_scalar() => match Scalar::coerce(kind, raw) {
                Some(scalar) => ConfigValue::Scalar(scalar),
                None => self.mismatch(path, kind.as_str(), raw),
            },
            (Kind::List, Value::Array(items)) => ConfigValue::List(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, item)| self.element(node, item, &path.index(idx)))
                    .collect(),
            ),
            (Kind::Set, Value::Array(items)) => {
                let elements: Vec<ConfigValue> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, item)| self.element(node, item, &path.index(idx)))
                    .collect();
                ConfigValue::Set(elements.into_iter().collect::<SetValue>())
            }
            (Kind::List | Kind::Set, other) => self.mismatch(path, "a list", other),
            (Kind::Map, Value::Object(entries)) => {
                let mut map = std::collections::BTreeMap::new();
                for (key, item) in entries {
                    if key == SIZE {
                        self.violations.push(Violation::new(
                            path.key(key),
                            ViolationKind::TypeMismatch,
                            format!("map key {SIZE:?} is reserved"),
                        ));
                        continue;
                    }
                    if let Some(value) = self.element(node, item, &path.key(key)) {
                        map.insert(key.clone(), value);
                    }
                }
                ConfigValue::Map(map)
            }
            (Kind::Object, Value::Object(fields)) => match node.block() {
                Some(block) => ConfigValue::Object(self.block(block, fields, path)),
                None => ConfigValue::Mismatched(raw.clone()),
            },
            (_, other) => self.mismatch(path, "a mapping", other),
        }
    }

    /// Decode one list, set or map element. `null` elements are reported
    /// and dropped.
    fn element(&mut self, node: &SchemaNode, item: &Value, path: &FieldPath) -> Option<ConfigValue> {
        if item.is_null() {
            self.violations.push(Violation::new(
                path.clone(),
                ViolationKind::TypeMismatch,
                "null elements are not allowed",
            ));
            return None;
        }

        let value = match (&node.elem, item) {
            (Some(Elem::Block { block }), Value::Object(fields)) => {
                ConfigValue::Object(self.block(block, fields, path))
            }
            (Some(Elem::Block { .. }), other) => self.mismatch(path, "a mapping", other),
            (Some(Elem::Node(inner)), _) => self.field(inner, item, path),
            (None, _) => ConfigValue::Mismatched(item.clone()),
        };
        Some(value)
    }

    fn mismatch(&mut self, path: &FieldPath, expected: &str, found: &Value) -> ConfigValue {
        self.violations.push(Violation::new(
            path.clone(),
            ViolationKind::TypeMismatch,
            format!("expected {expected}, found {}", describe(found)),
        ));
        ConfigValue::Mismatched(found.clone())
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "a mapping".to_string(),
    }
}
