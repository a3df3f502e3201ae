//! Value model for decoded configuration
//!
//! Presence is explicit: a field that was never supplied is
//! [`ConfigValue::Absent`], which is distinct from a field supplied with the
//! zero value of its kind (`0`, `false`, `""`).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::hash::SetKey;
use crate::path::{FieldPath, PathSegment};
use crate::schema::Kind;

static ABSENT: ConfigValue = ConfigValue::Absent;

/// A typed scalar payload.
///
/// Deserialises untagged, so schema files can write defaults as plain
/// JSON/TOML/YAML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// The scalar kind this payload belongs to
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Bool(_) => Kind::Bool,
            Scalar::Int(_) => Kind::Int,
            Scalar::Float(_) => Kind::Float,
            Scalar::String(_) => Kind::String,
        }
    }

    /// Coerce an external value to the given scalar kind.
    ///
    /// Returns `None` when the value cannot be represented as `kind`, or when
    /// `kind` is not a scalar kind.
    pub fn coerce(kind: Kind, raw: &Value) -> Option<Scalar> {
        match (kind, raw) {
            (_, Value::String(text)) => Scalar::parse(kind, text),
            (Kind::String, Value::Number(n)) => Some(Scalar::String(n.to_string())),
            (Kind::String, Value::Bool(b)) => Some(Scalar::String(b.to_string())),
            (Kind::Int, Value::Number(n)) => number_to_int(n).map(Scalar::Int),
            (Kind::Float, Value::Number(n)) => n.as_f64().and_then(finite_float),
            (Kind::Bool, Value::Bool(b)) => Some(Scalar::Bool(*b)),
            _ => None,
        }
    }

    /// Parse text into the given scalar kind.
    ///
    /// Booleans accept the spellings `1 t T true TRUE True` and
    /// `0 f F false FALSE False`.
    pub fn parse(kind: Kind, text: &str) -> Option<Scalar> {
        match kind {
            Kind::String => Some(Scalar::String(text.to_string())),
            Kind::Int => text.parse::<i64>().ok().map(Scalar::Int),
            Kind::Float => text.parse::<f64>().ok().and_then(finite_float),
            Kind::Bool => match text {
                "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(Scalar::Bool(true)),
                "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(Scalar::Bool(false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Render as an external JSON value
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number(Number::from(*i)),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value + 0.0)
    }
}

/// Finite floats only, with `-0.0` folded into `0.0`: canonical JSON renders
/// both as `0`, so they must be one set element.
fn finite_float(f: f64) -> Option<Scalar> {
    f.is_finite().then_some(Scalar::Float(f + 0.0))
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

fn number_to_int(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// A decoded configuration value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    /// The field was not supplied
    #[default]
    Absent,
    Scalar(Scalar),
    List(Vec<ConfigValue>),
    Set(SetValue),
    Map(BTreeMap<String, ConfigValue>),
    Object(ObjectValue),
    /// Supplied, but not coercible to the declared kind. Kept verbatim so
    /// presence checks still see the field and encoding reproduces the input.
    Mismatched(Value),
}

impl ConfigValue {
    /// Was this field supplied (or filled from a default)?
    pub fn is_present(&self) -> bool {
        !matches!(self, ConfigValue::Absent)
    }

    /// Element count for list, set and map values
    pub fn len(&self) -> Option<usize> {
        match self {
            ConfigValue::List(items) => Some(items.len()),
            ConfigValue::Set(set) => Some(set.len()),
            ConfigValue::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            ConfigValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Follow a field path from this value.
    pub fn lookup(&self, segments: &[PathSegment]) -> Option<&ConfigValue> {
        let Some((first, rest)) = segments.split_first() else {
            return Some(self);
        };
        let next = match (self, first) {
            (ConfigValue::Object(object), PathSegment::Key(key)) => object.fields.get(key)?,
            (ConfigValue::Map(entries), PathSegment::Key(key)) => entries.get(key)?,
            (ConfigValue::List(items), PathSegment::Index(idx)) => items.get(*idx)?,
            (ConfigValue::Set(set), PathSegment::Hash(key)) => set.get(key)?,
            _ => return None,
        };
        next.lookup(rest)
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<ObjectValue> for ConfigValue {
    fn from(value: ObjectValue) -> Self {
        ConfigValue::Object(value)
    }
}

impl From<SetValue> for ConfigValue {
    fn from(value: SetValue) -> Self {
        ConfigValue::Set(value)
    }
}

/// The fields of one block instance, keyed by field name.
///
/// After decoding, every field declared by the block has an entry, absent
/// ones included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    fields: BTreeMap<String, ConfigValue>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field, treating unknown names as absent.
    pub fn get(&self, name: &str) -> &ConfigValue {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConfigValue> {
        self.fields.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_present()
    }

    /// Iterate over fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.fields.iter()
    }

    /// Follow a dotted field path from the root of this object.
    ///
    /// ```
    /// use febe_schema::{ObjectValue, ConfigValue, Scalar, parse_path};
    ///
    /// let inner = ObjectValue::new().with("enabled", Scalar::Bool(true));
    /// let root = ObjectValue::new().with("spec", ConfigValue::List(vec![inner.into()]));
    /// let found = root.lookup(&parse_path("spec.0.enabled"));
    /// assert_eq!(found, Some(&ConfigValue::Scalar(Scalar::Bool(true))));
    /// ```
    pub fn lookup(&self, path: &FieldPath) -> Option<&ConfigValue> {
        let (first, rest) = path.segments().split_first()?;
        match first {
            PathSegment::Key(key) => self.fields.get(key)?.lookup(rest),
            _ => None,
        }
    }
}

/// A set of values keyed by the canonical hash of each element.
///
/// Insertion order is irrelevant and duplicate elements collapse to one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetValue {
    elements: BTreeMap<SetKey, ConfigValue>,
}

impl SetValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element, returning `false` if an equal element was present.
    /// The element already in the set is kept.
    pub fn insert(&mut self, value: ConfigValue) -> bool {
        match self.elements.entry(SetKey::of(&value)) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &SetKey) -> Option<&ConfigValue> {
        self.elements.get(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate in canonical (hash key) order
    pub fn iter(&self) -> impl Iterator<Item = (&SetKey, &ConfigValue)> {
        self.elements.iter()
    }

    /// Mutable access to the elements. Keys go stale once an element
    /// changes; call [`SetValue::rehash`] afterwards.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ConfigValue> {
        self.elements.values_mut()
    }

    /// Recompute every hash key from the current element contents.
    pub fn rehash(&mut self) {
        let elements = std::mem::take(&mut self.elements);
        for value in elements.into_values() {
            self.insert(value);
        }
    }
}

impl FromIterator<ConfigValue> for SetValue {
    fn from_iter<I: IntoIterator<Item = ConfigValue>>(iter: I) -> Self {
        let mut set = SetValue::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_is_distinct_from_zero() {
        assert!(!ConfigValue::Absent.is_present());
        assert!(ConfigValue::Scalar(Scalar::Int(0)).is_present());
        assert!(ConfigValue::Scalar(Scalar::Bool(false)).is_present());
        assert!(ConfigValue::Scalar(Scalar::String(String::new())).is_present());
    }

    #[test]
    fn object_get_unknown_is_absent() {
        let object = ObjectValue::new();
        assert_eq!(object.get("missing"), &ConfigValue::Absent);
    }

    #[test]
    fn coerce_int_from_string_and_integral_float() {
        assert_eq!(Scalar::coerce(Kind::Int, &json!("42")), Some(Scalar::Int(42)));
        assert_eq!(Scalar::coerce(Kind::Int, &json!(30.0)), Some(Scalar::Int(30)));
        assert_eq!(Scalar::coerce(Kind::Int, &json!(1.5)), None);
        assert_eq!(Scalar::coerce(Kind::Int, &json!("abc")), None);
    }

    #[test]
    fn coerce_string_from_number_and_bool() {
        assert_eq!(
            Scalar::coerce(Kind::String, &json!(7)),
            Some(Scalar::String("7".into()))
        );
        assert_eq!(
            Scalar::coerce(Kind::String, &json!(true)),
            Some(Scalar::String("true".into()))
        );
    }

    #[test]
    fn coerce_rejects_composites() {
        assert_eq!(Scalar::coerce(Kind::String, &json!(["a"])), None);
        assert_eq!(Scalar::coerce(Kind::Bool, &json!({"a": 1})), None);
        assert_eq!(Scalar::coerce(Kind::List, &json!("a")), None);
    }

    #[test]
    fn parse_bool_spellings() {
        for text in ["1", "t", "T", "true", "TRUE", "True"] {
            assert_eq!(Scalar::parse(Kind::Bool, text), Some(Scalar::Bool(true)));
        }
        for text in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(Scalar::parse(Kind::Bool, text), Some(Scalar::Bool(false)));
        }
        assert_eq!(Scalar::parse(Kind::Bool, "yes"), None);
    }

    #[test]
    fn parse_float_rejects_non_finite() {
        assert_eq!(Scalar::parse(Kind::Float, "0.25"), Some(Scalar::Float(0.25)));
        assert_eq!(Scalar::parse(Kind::Float, "inf"), None);
        assert_eq!(Scalar::parse(Kind::Float, "NaN"), None);
    }

    #[test]
    fn negative_zero_is_folded() {
        let parsed = Scalar::parse(Kind::Float, "-0.0").unwrap();
        assert_eq!(parsed.to_json().to_string(), "0.0");
        let coerced = Scalar::coerce(Kind::Float, &json!(-0.0)).unwrap();
        assert_eq!(coerced.to_json().to_string(), "0.0");
        assert_eq!(Scalar::from(-0.0).to_json().to_string(), "0.0");
    }

    #[test]
    fn set_keeps_first_of_colliding_elements() {
        let mut set = SetValue::new();
        assert!(set.insert(ConfigValue::Scalar(Scalar::Int(1))));
        assert!(!set.insert(ConfigValue::Scalar(Scalar::Float(1.0))));
        let (_, kept) = set.iter().next().unwrap();
        assert_eq!(kept, &ConfigValue::Scalar(Scalar::Int(1)));
    }

    #[test]
    fn set_collapses_duplicates_regardless_of_order() {
        let a: SetValue = ["x", "y", "x"]
            .into_iter()
            .map(|s| ConfigValue::Scalar(s.into()))
            .collect();
        let b: SetValue = ["y", "x"]
            .into_iter()
            .map(|s| ConfigValue::Scalar(s.into()))
            .collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn rehash_after_mutation_restores_keys() {
        let element = ObjectValue::new().with("name", Scalar::from("a"));
        let mut set: SetValue = [ConfigValue::Object(element)].into_iter().collect();
        for value in set.values_mut() {
            if let ConfigValue::Object(object) = value {
                object.insert("port", Scalar::Int(80));
            }
        }
        set.rehash();

        let expected = ObjectValue::new()
            .with("name", Scalar::from("a"))
            .with("port", Scalar::Int(80));
        let rebuilt: SetValue = [ConfigValue::Object(expected)].into_iter().collect();
        assert_eq!(set, rebuilt);
    }
}
