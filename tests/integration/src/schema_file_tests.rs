//! Built-in resource schemas written out as data and loaded back

use febe_resources::{Registry, backend_config};
use febe_schema::schema::loader::load_schema;
use febe_schema::{Engine, NoopResolver, Options};
use febe_test_utils::TestDocs;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_backend_config_schema_round_trips_through_a_file() {
    let docs = TestDocs::new();
    let schema = backend_config::schema_v1();
    let path = docs.write_json("backend_config.json", &serde_json::to_value(&schema).unwrap());

    let loaded = load_schema(&path).unwrap();
    assert_eq!(loaded, schema);
}

#[test]
fn test_provider_schema_round_trips_through_a_file() {
    let docs = TestDocs::new();
    let schema = Registry::with_builtins().provider().schema;
    let path = docs.write_json("provider.json", &serde_json::to_value(&schema).unwrap());

    assert_eq!(load_schema(&path).unwrap(), schema);
}

#[test]
fn test_loaded_schema_processes_like_the_builtin() {
    let docs = TestDocs::new();
    let builtin = backend_config::schema_v1();
    let path = docs.write_json("backend_config.json", &serde_json::to_value(&builtin).unwrap());

    let from_file = Engine::new(load_schema(&path).unwrap(), Options::default()).unwrap();
    let from_code = Engine::new(builtin, Options::default()).unwrap();

    let document = json!({
        "metadata": [{"name": "web"}],
        "spec": [{
            "iap": {"oauthclient_credentials_secret_name": "oauth"},
            "logging": {"enable": true, "sample_rate": "0.25"},
        }],
    });
    let a = from_file.process(&document, &NoopResolver);
    let b = from_code.process(&document, &NoopResolver);
    assert_eq!(a.violations, b.violations);
    assert_eq!(a.encoded, b.encoded);
    assert_eq!(a.violations.len(), 1);
    assert_eq!(a.encoded["spec"][0]["logging"]["sample_rate"], json!(0.25));
}

#[test]
fn test_malformed_schema_file_is_rejected() {
    let docs = TestDocs::new();
    let path = docs.write(
        "broken.toml",
        "[timeout_sec]\ntype = \"int\"\nrequired = true\ndefault = 30\n",
    );
    assert!(load_schema(&path).is_err());
}
