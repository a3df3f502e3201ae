//! Schema and document fixtures
//!
//! Each schema is small and focused on one constraint, except
//! [`nested_schema`], which mixes every kind for pipeline-level tests.

use febe_schema::{Block, SchemaNode};
use serde_json::{Value, json};

/// `{timeout_sec: int, optional, default 30}`
pub fn timeout_schema() -> Block {
    Block::new().field("timeout_sec", SchemaNode::int().optional().default(30))
}

/// Mutually exclusive query string sets
pub fn cache_policy_schema() -> Block {
    Block::new()
        .field("include_host", SchemaNode::bool().optional())
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

/// A secret name that needs `enabled` alongside it
pub fn iap_schema() -> Block {
    Block::new()
        .field("enabled", SchemaNode::bool().optional())
        .field(
            "oauthclient_credentials_secret_name",
            SchemaNode::string().optional().required_with(["enabled"]),
        )
}

/// A singleton `spec` block covering every kind
pub fn nested_schema() -> Block {
    let cdn = Block::new()
        .field("enabled", SchemaNode::bool().optional().default(false))
        .field("cache_policy", SchemaNode::object(cache_policy_schema()).optional());
    let rule = Block::new()
        .field("name", SchemaNode::string().required())
        .field("port", SchemaNode::int().optional().default(80));
    let spec = Block::new()
        .field("timeout_sec", SchemaNode::int().optional().default(30))
        .field("weight", SchemaNode::float().optional())
        .field("cdn", SchemaNode::object(cdn).optional())
        .field("headers", SchemaNode::set(SchemaNode::string()).optional())
        .field("rules", SchemaNode::set(rule).optional())
        .field("labels", SchemaNode::map(SchemaNode::string()).optional());

    Block::new().field("spec", SchemaNode::list(spec).required().max_items(1))
}

/// A valid document for [`nested_schema`]
pub fn nested_document() -> Value {
    json!({
        "spec": [{
            "weight": 0.5,
            "cdn": {"cache_policy": {"include_host": true, "query_string_whitelist": ["b", "a"]}},
            "headers": ["X-Client-Region", "X-Client-City"],
            "rules": [{"name": "https", "port": 443}, {"name": "http"}],
            "labels": {"app.kubernetes.io/name": "web"}
        }]
    })
}

/// [`timeout_schema`] plus a string set, as schema file text
pub const SCHEMA_JSON: &str = r#"{
  "timeout_sec": { "type": "int", "optional": true, "default": 30 },
  "tags": { "type": "set", "optional": true, "elem": { "type": "string" } }
}"#;
