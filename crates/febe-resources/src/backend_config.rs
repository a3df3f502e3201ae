//! The `backend_config` resource
//!
//! Load balancer backend settings for an ingress: timeouts, connection
//! draining, CDN and cache keys, identity-aware proxy, session affinity,
//! custom request headers and access logging.

use febe_schema::{Block, SchemaNode};

use crate::metadata::namespaced_metadata;
use crate::resource::ResourceDefinition;

pub const NAME: &str = "backend_config";
pub const SCHEMA_VERSION: u32 = 1;

pub fn definition() -> ResourceDefinition {
    ResourceDefinition::new(NAME, SCHEMA_VERSION, schema_v1())
}

pub fn schema_v1() -> Block {
    Block::new()
        .field("metadata", namespaced_metadata("backendconfig", false))
        .field(
            "spec",
            SchemaNode::list(spec())
                .required()
                .max_items(1)
                .description("Spec defines the specification of the desired behavior of the backendconfig"),
        )
}

fn spec() -> Block {
    Block::new()
        .field(
            "timeout_sec",
            SchemaNode::int()
                .optional()
                .default(30)
                .description("Backend service timeout period in seconds, 30 when unset"),
        )
        .field(
            "connection_draining",
            SchemaNode::object(
                Block::new().field("draining_timeout_sec", SchemaNode::int().optional()),
            )
            .optional(),
        )
        .field("cdn", SchemaNode::object(cdn()).optional().description("CDN configuration"))
        .field("iap", SchemaNode::object(iap()).optional())
        .field(
            "session_affinity",
            SchemaNode::object(
                Block::new()
                    .field("affinity_type", SchemaNode::string().optional())
                    .field("affinity_cookie_ttl_sec", SchemaNode::int().optional()),
            )
            .optional(),
        )
        .field(
            "custom_request_headers",
            SchemaNode::object(
                Block::new().field("headers", SchemaNode::set(SchemaNode::string()).optional()),
            )
            .optional(),
        )
        .field(
            "logging",
            SchemaNode::object(
                Block::new()
                    .field("enable", SchemaNode::bool().optional())
                    .field(
                        "sample_rate",
                        SchemaNode::float()
                            .optional()
                            .description("Fraction of requests logged, between 0.0 and 1.0"),
                    ),
            )
            .optional(),
        )
}

fn cdn() -> Block {
    Block::new()
        .field(
            "enabled",
            SchemaNode::bool()
                .optional()
                .default(false)
                .description("If set to true, Cloud CDN is enabled for this backend"),
        )
        .field(
            "cache_policy",
            SchemaNode::object(cache_policy()).optional().description("Cache key policy"),
        )
}

fn cache_policy() -> Block {
    Block::new()
        .field(
            "include_host",
            SchemaNode::bool()
                .optional()
                .description("If set to true, requests to different hosts are cached separately"),
        )
        .field(
            "include_protocol",
            SchemaNode::bool()
                .optional()
                .description("If set to true, HTTP and HTTPS requests are cached separately"),
        )
        .field(
            "include_query_string",
            SchemaNode::bool()
                .optional()
                .description("If set to true, query string parameters are part of the cache key"),
        )
        .field(
            "query_string_blacklist",
            SchemaNode::set(SchemaNode::string())
                .optional()
                .conflicts_with(["query_string_whitelist"])
                .description("Query string parameters excluded from cache keys"),
        )
        .field(
            "query_string_whitelist",
            SchemaNode::set(SchemaNode::string())
                .optional()
                .conflicts_with(["query_string_blacklist"])
                .description("Query string parameters included in cache keys"),
        )
}

fn iap() -> Block {
    Block::new()
        .field("enabled", SchemaNode::bool().optional())
        .field(
            "oauthclient_credentials_secret_name",
            SchemaNode::string()
                .optional()
                .required_with(["enabled"])
                .description("Secret holding the OAuth client credentials"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_well_formed() {
        assert_eq!(schema_v1().validate(), Ok(()));
    }

    #[test]
    fn definition_carries_version_and_timeouts() {
        let definition = definition();
        assert_eq!(definition.name, "backend_config");
        assert_eq!(definition.schema_version, 1);
        assert_eq!(definition.timeouts.create.as_secs(), 600);
    }

    #[test]
    fn spec_is_a_required_singleton() {
        let schema = schema_v1();
        let spec = schema.get("spec").unwrap();
        assert!(spec.required);
        assert_eq!(spec.max_items, 1);
        let names: Vec<&str> = spec.block().unwrap().iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "timeout_sec",
                "connection_draining",
                "cdn",
                "iap",
                "session_affinity",
                "custom_request_headers",
                "logging",
            ]
        );
    }
}
