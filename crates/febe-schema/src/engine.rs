//! The validation pipeline

use std::sync::Arc;

use serde_json::Value;

use crate::codec::{self, FlatMap};
use crate::config::Options;
use crate::error::SchemaError;
use crate::evaluate::evaluate;
use crate::hash::document_checksum;
use crate::normalize::normalize;
use crate::resolver::DefaultResolver;
use crate::schema::Block;
use crate::value::ObjectValue;
use crate::violation::Violation;

/// A validated schema plus options, ready to process documents.
///
/// Cloning is cheap; the schema is shared and never mutated, so one engine
/// can serve any number of threads.
///
/// # Example
///
/// ```
/// use febe_schema::{Block, Engine, NoopResolver, Options, SchemaNode};
/// use serde_json::json;
///
/// let schema = Block::new().field("timeout_sec", SchemaNode::int().optional().default(30));
/// let engine = Engine::new(schema, Options::default()).unwrap();
///
/// let outcome = engine.process(&json!({}), &NoopResolver);
/// assert!(outcome.is_valid());
/// assert_eq!(outcome.encoded, json!({"timeout_sec": 30}));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    schema: Arc<Block>,
    options: Options,
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The normalized value
    pub value: ObjectValue,
    /// Decode violations followed by constraint violations
    pub violations: Vec<Violation>,
    /// Canonical encoding of `value`
    pub encoded: Value,
}

impl Engine {
    /// Validate `schema` and build an engine around it.
    pub fn new(schema: Block, options: Options) -> Result<Self, SchemaError> {
        schema.validate()?;
        tracing::debug!(fields = schema.len(), "Schema accepted");
        Ok(Self {
            schema: Arc::new(schema),
            options,
        })
    }

    pub fn schema(&self) -> &Block {
        &self.schema
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run decode, normalize, evaluate and encode over one document.
    pub fn process(&self, input: &Value, resolver: &dyn DefaultResolver) -> Outcome {
        let decoded = codec::decode(&self.schema, input, &self.options);
        let mut value = decoded.value;
        let mut violations = decoded.violations;

        normalize(&self.schema, &mut value, resolver);
        violations.extend(evaluate(&self.schema, &value));

        let encoded = codec::encode(&value);
        tracing::debug!(violations = violations.len(), "Processed document");
        Outcome {
            value,
            violations,
            encoded,
        }
    }

    /// Run the pipeline over a flat state encoding.
    pub fn process_flat(&self, flat: &FlatMap, resolver: &dyn DefaultResolver) -> Outcome {
        self.process(&codec::unflatten(&self.schema, flat), resolver)
    }

    /// Flat encoding of a processed value
    pub fn flatten(&self, value: &ObjectValue) -> FlatMap {
        codec::flatten(value)
    }
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn flatten(&self) -> FlatMap {
        codec::flatten(&self.value)
    }

    /// `sha256:`-prefixed checksum of the canonical encoding
    pub fn checksum(&self) -> String {
        document_checksum(&self.encoded)
    }

    /// The canonical encoding, or every violation found
    pub fn into_result(self) -> Result<Value, Vec<Violation>> {
        if self.violations.is_empty() {
            Ok(self.encoded)
        } else {
            Err(self.violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::NoopResolver;
    use crate::schema::SchemaNode;
    use crate::violation::ViolationKind;
    use serde_json::json;

    fn engine() -> Engine {
        let schema = Block::new()
            .field("timeout_sec", SchemaNode::int().optional().default(30))
            .field("name", SchemaNode::string().required());
        Engine::new(schema, Options::default()).unwrap()
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn rejects_malformed_schema() {
        let schema = Block::new().field("a", SchemaNode::int().optional().conflicts_with(["b"]));
        assert!(matches!(
            Engine::new(schema, Options::default()),
            Err(SchemaError::InvalidReference { .. })
        ));
    }

    #[test]
    fn decode_violations_come_first() {
        let outcome = engine().process(&json!({"timeout_sec": "x"}), &NoopResolver);
        let kinds: Vec<ViolationKind> = outcome.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::TypeMismatch, ViolationKind::MissingRequired]
        );
    }

    #[test]
    fn into_result_splits_on_violations() {
        let ok = engine().process(&json!({"name": "web"}), &NoopResolver);
        assert_eq!(
            ok.clone().into_result(),
            Ok(json!({"name": "web", "timeout_sec": 30}))
        );
        assert!(ok.checksum().starts_with("sha256:"));

        let err = engine().process(&json!({}), &NoopResolver).into_result();
        assert_eq!(err.map_err(|v| v.len()), Err(1));
    }

    #[test]
    fn process_flat_matches_process() {
        let engine = engine();
        let nested = engine.process(&json!({"name": "web", "timeout_sec": 5}), &NoopResolver);
        let flat = engine.process_flat(&nested.flatten(), &NoopResolver);
        assert_eq!(flat.encoded, nested.encoded);
        assert_eq!(engine.flatten(&flat.value), nested.flatten());
    }
}
