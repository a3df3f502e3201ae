use febe_schema::hash::canonical_text;
use febe_schema::{Engine, NoopResolver, Options};
use febe_test_utils::fixtures;

fn processed() -> febe_schema::Outcome {
    let engine = Engine::new(fixtures::nested_schema(), Options::default()).unwrap();
    engine.process(&fixtures::nested_document(), &NoopResolver)
}

#[test]
fn snapshot_canonical_encoding() {
    let outcome = processed();
    insta::assert_snapshot!(canonical_text(&outcome.encoded), @r###"{"spec":[{"cdn":{"cache_policy":{"include_host":true,"query_string_whitelist":["a","b"]},"enabled":false},"headers":["X-Client-City","X-Client-Region"],"labels":{"app.kubernetes.io/name":"web"},"rules":[{"name":"https","port":443},{"name":"http","port":80}],"timeout_sec":30,"weight":0.5}]}"###);
}

#[test]
fn snapshot_flat_encoding() {
    let outcome = processed();
    let lines: Vec<String> = outcome
        .flatten()
        .iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r###"
    spec.# = 1
    spec.0.% = 6
    spec.0.cdn.% = 2
    spec.0.cdn.cache_policy.% = 2
    spec.0.cdn.cache_policy.include_host = true
    spec.0.cdn.cache_policy.query_string_whitelist.# = 2
    spec.0.cdn.cache_policy.query_string_whitelist.ac8d8342bbb2362d13f0a559a3621bb407011368895164b628a54f7fc33fc43c = a
    spec.0.cdn.cache_policy.query_string_whitelist.c100f95c1913f9c72fc1f4ef0847e1e723ffe0bde0b36e5f36c13f81fe8c26ed = b
    spec.0.cdn.enabled = false
    spec.0.headers.# = 2
    spec.0.headers.3e18126a5ef3fc415a3d8d293584d5a3132932367859ec62a757abc577065ccf = X-Client-City
    spec.0.headers.76c17c2fbd6f6b68633f68a36efb33eb01838d4a142fa66c4077cb1f9d9c3b7a = X-Client-Region
    spec.0.labels.% = 1
    spec.0.labels.app.kubernetes.io/name = web
    spec.0.rules.# = 2
    spec.0.rules.5718a0deb5ef544d86d3aacae6da178817159f163cb669a7f34502d17228454d.% = 2
    spec.0.rules.5718a0deb5ef544d86d3aacae6da178817159f163cb669a7f34502d17228454d.name = https
    spec.0.rules.5718a0deb5ef544d86d3aacae6da178817159f163cb669a7f34502d17228454d.port = 443
    spec.0.rules.b8da588a891433b191abec178f36be04cc3a771977c77ee64c4e75a000be9d35.% = 2
    spec.0.rules.b8da588a891433b191abec178f36be04cc3a771977c77ee64c4e75a000be9d35.name = http
    spec.0.rules.b8da588a891433b191abec178f36be04cc3a771977c77ee64c4e75a000be9d35.port = 80
    spec.0.timeout_sec = 30
    spec.0.weight = 0.5
    "###);
}

#[test]
fn snapshot_violation_report() {
    let engine = Engine::new(fixtures::nested_schema(), Options::default()).unwrap();
    let input = serde_json::json!({
        "spec": [{
            "timeout_sec": "soon",
            "cdn": {"cache_policy": {"query_string_blacklist": ["a"], "query_string_whitelist": ["b"]}},
        }],
        "status": {}
    });
    let report: Vec<String> = engine
        .process(&input, &NoopResolver)
        .violations
        .iter()
        .map(ToString::to_string)
        .collect();
    insta::assert_snapshot!(report.join("\n"), @r###"
    spec.0.timeout_sec: [TypeMismatch] expected int, found string "soon"
    status: [UnknownField] field is not declared by the schema
    spec.0.cdn.cache_policy.query_string_blacklist: [Conflict] conflicts with spec.0.cdn.cache_policy.query_string_whitelist
    spec.0.cdn.cache_policy.query_string_whitelist: [Conflict] conflicts with spec.0.cdn.cache_policy.query_string_blacklist
    "###);
}
