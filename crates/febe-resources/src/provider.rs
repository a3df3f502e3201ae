//! Provider configuration
//!
//! Connection settings for the cluster API. Most string settings fall back
//! to an environment variable and then to `""`; `config_path` has no
//! fallback so that it stays absent unless configured.

use febe_schema::{Block, SchemaNode};

use crate::resource::ResourceDefinition;

pub const NAME: &str = "provider";

/// String settings read from the environment: (field, variable, description)
const ENV_STRINGS: &[(&str, &str, &str)] = &[
    ("host", "KUBE_HOST", "The hostname (in form of URI) of the Kubernetes API server"),
    ("username", "KUBE_USER", "The username for HTTP basic authentication"),
    ("password", "KUBE_PASSWORD", "The password for HTTP basic authentication"),
    ("client_certificate", "KUBE_CLIENT_CERT_DATA", "PEM-encoded client certificate for TLS authentication"),
    ("client_key", "KUBE_CLIENT_KEY_DATA", "PEM-encoded client certificate key for TLS authentication"),
    ("cluster_ca_certificate", "KUBE_CLUSTER_CA_CERT_DATA", "PEM-encoded root certificates bundle for TLS authentication"),
    ("config_context", "KUBE_CTX", ""),
    ("config_context_auth_info", "KUBE_CTX_AUTH_INFO", ""),
    ("config_context_cluster", "KUBE_CTX_CLUSTER", ""),
    ("token", "KUBE_TOKEN", "Token to authenticate a service account"),
];

pub fn definition() -> ResourceDefinition {
    ResourceDefinition::new(NAME, 0, schema())
}

pub fn schema() -> Block {
    let mut block = Block::new();
    for (name, env, description) in ENV_STRINGS {
        let mut node = SchemaNode::string().optional().default_env_or(*env, "");
        if !description.is_empty() {
            node = node.description(*description);
        }
        block.push(*name, node);
    }

    block
        .field(
            "insecure",
            SchemaNode::bool()
                .optional()
                .default_env_or("KUBE_INSECURE", false)
                .description("Whether the server should be accessed without verifying the TLS certificate"),
        )
        .field(
            "config_paths",
            SchemaNode::list(SchemaNode::string())
                .optional()
                .description("A list of paths to kube config files"),
        )
        .field(
            "config_path",
            SchemaNode::string()
                .optional()
                .default_env("KUBE_CONFIG_PATH")
                .conflicts_with(["config_paths"])
                .description("Path to the kube config file"),
        )
        .field(
            "exec",
            SchemaNode::list(
                Block::new()
                    .field("api_version", SchemaNode::string().required())
                    .field("command", SchemaNode::string().required())
                    .field("env", SchemaNode::map(SchemaNode::string()).optional())
                    .field("args", SchemaNode::list(SchemaNode::string()).optional()),
            )
            .optional()
            .max_items(1),
        )
}
