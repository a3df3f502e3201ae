//! Cross-field constraint evaluation
//!
//! Runs after normalization, so defaults count as present. Fields are
//! visited in declaration order and every violation found is reported; no
//! check short-circuits another.
//!
//! | Constraint | Reported at |
//! |---|---|
//! | `required` field absent | the field |
//! | two conflicting siblings present | each present field, once per partner |
//! | `required_with` sibling absent | the missing sibling, once per block |
//! | more than `max_items` elements | the collection |

use std::collections::BTreeSet;

use crate::path::FieldPath;
use crate::schema::{Block, Elem, SchemaNode};
use crate::value::{ConfigValue, ObjectValue};
use crate::violation::{Violation, ViolationKind};

/// Evaluate every constraint of `schema` against a normalized instance.
pub fn evaluate(schema: &Block, object: &ObjectValue) -> Vec<Violation> {
    let mut violations = Vec::new();
    evaluate_block(schema, object, &FieldPath::root(), &mut violations);
    violations
}

fn evaluate_block(
    block: &Block,
    object: &ObjectValue,
    path: &FieldPath,
    violations: &mut Vec<Violation>,
) {
    let mut reported_missing = BTreeSet::new();
    for (name, node) in block.iter() {
        let field_path = path.key(name);
        let value = object.get(name);

        if !value.is_present() {
            if node.required {
                violations.push(Violation::new(
                    field_path,
                    ViolationKind::MissingRequired,
                    "required field is not set",
                ));
            }
            continue;
        }

        for partner in block.conflicts_of(name) {
            if object.is_present(partner) {
                violations.push(Violation::new(
                    field_path.clone(),
                    ViolationKind::Conflict,
                    format!("conflicts with {}", path.key(partner)),
                ));
            }
        }

        for sibling in &node.required_with {
            if !object.is_present(sibling) && reported_missing.insert(sibling.as_str()) {
                violations.push(Violation::new(
                    path.key(sibling),
                    ViolationKind::RequiredWithMissing,
                    format!("required when {field_path} is set"),
                ));
            }
        }

        check_cardinality(node, value, &field_path, violations);
        evaluate_children(node, value, &field_path, violations);
    }
}

fn check_cardinality(
    node: &SchemaNode,
    value: &ConfigValue,
    path: &FieldPath,
    violations: &mut Vec<Violation>,
) {
    if node.max_items <= 0 {
        return;
    }
    let Some(len) = value.len() else {
        return;
    };
    let exceeded = !i64::try_from(len).is_ok_and(|len| len <= node.max_items);
    if exceeded {
        violations.push(Violation::new(
            path.clone(),
            ViolationKind::CardinalityExceeded,
            format!("has {len} elements, at most {} allowed", node.max_items),
        ));
    }
}

fn evaluate_children(
    node: &SchemaNode,
    value: &ConfigValue,
    path: &FieldPath,
    violations: &mut Vec<Violation>,
) {
    let Some(Elem::Block { block }) = &node.elem else {
        return;
    };
    match value {
        ConfigValue::Object(object) => evaluate_block(block, object, path, violations),
        ConfigValue::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                if let ConfigValue::Object(object) = item {
                    evaluate_block(block, object, &path.index(idx), violations);
                }
            }
        }
        ConfigValue::Set(set) => {
            for (key, item) in set.iter() {
                if let ConfigValue::Object(object) = item {
                    evaluate_block(block, object, &path.hash(key), violations);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::codec::decode;
    use crate::normalize::normalize;
    use crate::resolver::NoopResolver;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(schema: &Block, input: serde_json::Value) -> Vec<Violation> {
        let mut value = decode(schema, &input, &Options::default()).value;
        normalize(schema, &mut value, &NoopResolver);
        evaluate(schema, &value)
    }

    fn summary(violations: &[Violation]) -> Vec<(String, ViolationKind)> {
        violations
            .iter()
            .map(|v| (v.field_path.to_string(), v.kind))
            .collect()
    }

    fn cache_policy() -> Block {
        Block::new()
            .field(
                "query_string_blacklist",
                SchemaNode::set(SchemaNode::string())
                    .optional()
                    .conflicts_with(["query_string_whitelist"]),
            )
            .field(
                "query_string_whitelist",
                SchemaNode::set(SchemaNode::string())
                    .optional()
                    .conflicts_with(["query_string_blacklist"]),
            )
    }

    #[test]
    fn missing_required_field() {
        let schema = Block::new().field("name", SchemaNode::string().required());
        assert_eq!(
            summary(&run(&schema, json!({}))),
            vec![("name".to_string(), ViolationKind::MissingRequired)]
        );
    }

    #[test]
    fn conflict_reported_on_both_sides() {
        let violations = run(
            &cache_policy(),
            json!({"query_string_blacklist": ["a"], "query_string_whitelist": ["b"]}),
        );
        assert_eq!(
            summary(&violations),
            vec![
                ("query_string_blacklist".to_string(), ViolationKind::Conflict),
                ("query_string_whitelist".to_string(), ViolationKind::Conflict),
            ]
        );
    }

    #[test]
    fn one_sided_conflict_declaration_is_symmetric() {
        let schema = Block::new()
            .field("config_path", SchemaNode::string().optional().conflicts_with(["config_paths"]))
            .field("config_paths", SchemaNode::list(SchemaNode::string()).optional());
        let violations = run(&schema, json!({"config_path": "a", "config_paths": ["b"]}));
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::Conflict));
    }

    #[test]
    fn empty_set_still_counts_as_present() {
        let violations = run(
            &cache_policy(),
            json!({"query_string_blacklist": [], "query_string_whitelist": ["b"]}),
        );
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn required_with_reports_missing_sibling() {
        let schema = Block::new()
            .field("enabled", SchemaNode::bool().optional())
            .field(
                "oauthclient_credentials_secret_name",
                SchemaNode::string().optional().required_with(["enabled"]),
            );
        let violations = run(&schema, json!({"oauthclient_credentials_secret_name": "s"}));
        assert_eq!(
            summary(&violations),
            vec![("enabled".to_string(), ViolationKind::RequiredWithMissing)]
        );
        assert!(run(&schema, json!({})).is_empty());
    }

    #[test]
    fn cardinality_bound() {
        let schema = Block::new().field(
            "spec",
            SchemaNode::list(Block::new().field("timeout_sec", SchemaNode::int().optional()))
                .required()
                .max_items(1),
        );
        assert!(run(&schema, json!({"spec": [{}]})).is_empty());
        let violations = run(&schema, json!({"spec": [{}, {}]}));
        assert_eq!(
            summary(&violations),
            vec![("spec".to_string(), ViolationKind::CardinalityExceeded)]
        );
        assert_eq!(violations[0].detail, "has 2 elements, at most 1 allowed");
    }

    #[test]
    fn missing_sibling_reported_once() {
        let schema = Block::new()
            .field("enabled", SchemaNode::bool().optional())
            .field("secret_name", SchemaNode::string().optional().required_with(["enabled"]))
            .field("client_id", SchemaNode::string().optional().required_with(["enabled"]));
        let violations = run(&schema, json!({"secret_name": "s", "client_id": "c"}));
        assert_eq!(
            summary(&violations),
            vec![("enabled".to_string(), ViolationKind::RequiredWithMissing)]
        );
        assert_eq!(violations[0].detail, "required when secret_name is set");
    }

    #[test]
    fn set_cardinality_bound() {
        let schema = Block::new().field(
            "headers",
            SchemaNode::set(SchemaNode::string()).optional().max_items(2),
        );
        let violations = run(&schema, json!({"headers": ["a", "b", "c"]}));
        assert_eq!(
            summary(&violations),
            vec![("headers".to_string(), ViolationKind::CardinalityExceeded)]
        );
        assert_eq!(violations[0].detail, "has 3 elements, at most 2 allowed");
    }

    #[test]
    fn set_duplicates_collapse_before_the_bound() {
        let schema = Block::new().field(
            "headers",
            SchemaNode::set(SchemaNode::string()).optional().max_items(2),
        );
        assert!(run(&schema, json!({"headers": ["a", "b", "a", "b"]})).is_empty());
    }

    #[test]
    fn nested_violations_carry_element_paths() {
        let schema = Block::new().field(
            "spec",
            SchemaNode::list(
                Block::new().field(
                    "cdn",
                    SchemaNode::object(
                        Block::new().field("cache_policy", SchemaNode::object(cache_policy()).optional()),
                    )
                    .optional(),
                ),
            )
            .required(),
        );
        let input = json!({"spec": [{"cdn": {"cache_policy": {
            "query_string_blacklist": ["a"],
            "query_string_whitelist": ["b"],
        }}}]});
        let paths: Vec<String> = run(&schema, input)
            .iter()
            .map(|v| v.field_path.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "spec.0.cdn.cache_policy.query_string_blacklist",
                "spec.0.cdn.cache_policy.query_string_whitelist",
            ]
        );
    }

    #[test]
    fn set_element_violations_use_hash_paths() {
        let schema = Block::new().field(
            "rules",
            SchemaNode::set(Block::new().field("name", SchemaNode::string().required()))
                .optional(),
        );
        let violations = run(&schema, json!({"rules": [{}]}));
        assert_eq!(violations.len(), 1);
        let segments = violations[0].field_path.segments();
        assert!(matches!(segments[1], crate::path::PathSegment::Hash(_)));
        assert_eq!(violations[0].field_path.to_string().split('.').count(), 3);
    }
}
