mod common;

use common::TestEnv;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).expect("read schema");
    serde_json::from_str(&raw).expect("schema json")
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("{} validation failed: {}", schema_name, msgs.join(" | "));
}

#[test]
fn build_artifacts_match_contracts() {
    let env = TestEnv::new();
    let summary = env.build();
    validate("run_summary.schema.json", &summary);

    validate("catalog.schema.json", &env.artifact("issuers.json"));
    validate("rankings.schema.json", &env.artifact("rankings.json"));
    validate("manifest.schema.json", &env.artifact("manifest.json"));

    for entry in fs::read_dir(env.out.join("data")).expect("read data dir") {
        let path = entry.expect("dir entry").path();
        let raw = fs::read_to_string(&path).expect("read issuer artifact");
        let data: Value = serde_json::from_str(&raw).expect("issuer artifact json");
        validate("issuer_artifact.schema.json", &data);
    }
}
