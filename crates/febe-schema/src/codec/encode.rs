//! Value model -> canonical external representation
//!
//! Absent fields are omitted, sets come out in hash-key order and object
//! keys are sorted, so two equal values always encode identically.

use serde_json::{Map, Value};

use crate::value::{ConfigValue, ObjectValue};

/// Encode a block instance as a JSON object.
pub fn encode(object: &ObjectValue) -> Value {
    Value::Object(encode_fields(object))
}

/// Encode a single value. Returns `None` for [`ConfigValue::Absent`].
pub fn encode_value(value: &ConfigValue) -> Option<Value> {
    let encoded = match value {
        ConfigValue::Absent => return None,
        ConfigValue::Scalar(scalar) => scalar.to_json(),
        ConfigValue::List(items) => Value::Array(items.iter().filter_map(encode_value).collect()),
        ConfigValue::Set(set) => Value::Array(
            set.iter()
                .filter_map(|(_, element)| encode_value(element))
                .collect(),
        ),
        ConfigValue::Map(entries) => Value::Object(
            entries
                .iter()
                .filter_map(|(key, item)| encode_value(item).map(|v| (key.clone(), v)))
                .collect(),
        ),
        ConfigValue::Object(object) => Value::Object(encode_fields(object)),
        ConfigValue::Mismatched(raw) => raw.clone(),
    };
    Some(encoded)
}

fn encode_fields(object: &ObjectValue) -> Map<String, Value> {
    object
        .iter()
        .filter_map(|(name, value)| encode_value(value).map(|v| (name.clone(), v)))
        .collect()
}
