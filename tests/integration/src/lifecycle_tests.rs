//! Lifecycle of a backend_config document across the workspace
//!
//! Load from disk, process, persist the flat state, restore it, and detect
//! drift against a changed document.

use febe_resources::Registry;
use febe_schema::codec::FlatMap;
use febe_schema::schema::loader::load_document;
use febe_schema::{Change, Engine, MapResolver, NoopResolver, Options, StateDiff, ViolationKind};
use febe_test_utils::TestDocs;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const BACKEND_YAML: &str = r#"
metadata:
  - name: web-backend
    labels:
      app: web
spec:
  - timeout_sec: 45
    cdn:
      cache_policy:
        include_host: true
        query_string_whitelist: [page, id]
    custom_request_headers:
      headers:
        - "X-Client-Region:{client_region}"
"#;

fn engine(name: &str) -> Engine {
    let registry = Registry::with_builtins();
    match name {
        "provider" => registry.provider().engine(Options::default()).unwrap(),
        _ => registry.engine(name, Options::default()).unwrap(),
    }
}

fn backend(spec: Value) -> Value {
    json!({
        "metadata": [{"name": "web-backend"}],
        "spec": [spec],
    })
}

#[test]
fn test_document_survives_persist_and_restore() {
    let docs = TestDocs::new();
    let path = docs.write("backend.yaml", BACKEND_YAML);
    let document = load_document(&path).unwrap();

    let engine = engine("backend_config");
    let applied = engine.process(&document, &NoopResolver);
    assert!(applied.is_valid(), "{:?}", applied.violations);
    assert_eq!(applied.encoded["spec"][0]["cdn"]["enabled"], json!(false));

    // Persist the flat state the way a host would, then read it back
    docs.write_json("state.json", &serde_json::to_value(applied.flatten()).unwrap());
    let stored: FlatMap = serde_json::from_str(&docs.read("state.json")).unwrap();
    assert_eq!(stored["metadata.0.labels.app"], "web");

    let restored = engine.process_flat(&stored, &NoopResolver);
    assert!(restored.is_valid(), "{:?}", restored.violations);
    assert_eq!(restored.encoded, applied.encoded);
    assert_eq!(restored.checksum(), applied.checksum());
    assert!(StateDiff::compute(&applied.encoded, &restored.encoded).is_equivalent);
}

#[test]
fn test_same_document_in_every_format_is_equivalent() {
    let docs = TestDocs::new();
    let yaml = docs.write("backend.yaml", "metadata:\n  - name: web\nspec:\n  - timeout_sec: 10\n");
    let toml = docs.write(
        "backend.toml",
        "[[metadata]]\nname = \"web\"\n\n[[spec]]\ntimeout_sec = 10\n",
    );
    let json = docs.write_json(
        "backend.json",
        &json!({"metadata": [{"name": "web"}], "spec": [{"timeout_sec": 10}]}),
    );

    let engine = engine("backend_config");
    let checksums: Vec<String> = [yaml, toml, json]
        .iter()
        .map(|path| {
            let outcome = engine.process(&load_document(path).unwrap(), &NoopResolver);
            assert!(outcome.is_valid(), "{path:?}: {:?}", outcome.violations);
            outcome.checksum()
        })
        .collect();
    assert_eq!(checksums[0], checksums[1]);
    assert_eq!(checksums[1], checksums[2]);
}

#[test]
fn test_drift_between_stored_state_and_new_config() {
    let engine = engine("backend_config");
    let before = engine.process(
        &backend(json!({
            "timeout_sec": 45,
            "cdn": {"cache_policy": {"query_string_whitelist": ["page", "id"]}},
        })),
        &NoopResolver,
    );
    let after = engine.process(
        &backend(json!({
            "timeout_sec": 60,
            "cdn": {"cache_policy": {"query_string_whitelist": ["id", "page"]}},
        })),
        &NoopResolver,
    );
    assert!(before.is_valid() && after.is_valid());

    // Reordering a set is not drift; the timeout change is
    let nested = StateDiff::compute(&before.encoded, &after.encoded);
    assert_eq!(nested.changes.len(), 1);
    assert_eq!(nested.changes[0].path().to_string(), "spec.0.timeout_sec");

    let flat = StateDiff::compute_flat(&before.flatten(), &after.flatten());
    assert_eq!(
        flat.changes,
        vec![Change::Modified {
            path: "spec.0.timeout_sec".into(),
            old: json!("45"),
            new: json!("60"),
        }]
    );
    assert!(flat.similarity > 0.5 && flat.similarity < 1.0);
    assert_eq!(StateDiff::changed_lines(&before.flatten(), &after.flatten()), 2);
}

#[test]
fn test_violations_block_persisting() {
    let engine = engine("backend_config");
    let outcome = engine.process(
        &backend(json!({
            "cdn": {"cache_policy": {
                "query_string_blacklist": ["utm"],
                "query_string_whitelist": ["id"],
            }},
        })),
        &NoopResolver,
    );

    let violations = outcome.into_result().unwrap_err();
    let kinds: Vec<ViolationKind> = violations.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![ViolationKind::Conflict, ViolationKind::Conflict]);
}

#[test]
fn test_provider_defaults_follow_resolver() {
    let engine = engine("provider");
    let first = engine.process(&json!({}), &MapResolver::new().with("KUBE_TOKEN", "abc"));
    let second = engine.process(&json!({}), &MapResolver::new().with("KUBE_TOKEN", "xyz"));
    assert_eq!(first.encoded["token"], json!("abc"));
    assert_eq!(second.encoded["token"], json!("xyz"));

    let diff = StateDiff::compute(&first.encoded, &second.encoded);
    assert_eq!(diff.changes.len(), 1);
    assert_eq!(diff.changes[0].path().to_string(), "token");
}
