//! Integration tests that run the describe_topology CLI on JSON fixtures in
//! tests/integration/.

use std::path::Path;
use std::process::Command;

fn integration_dir() -> std::path::PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("integration")
}

fn fixture(name: &str) -> std::path::PathBuf {
  integration_dir().join(name)
}

/// Run `cargo run --bin describe_topology -- <args...>` from the crate root. Returns (stdout, stderr, success).
fn run_describe(args: &[&str]) -> (Vec<u8>, Vec<u8>, bool) {
  run_describe_with_env(args, &[])
}

/// Like run_describe but with extra env vars (e.g. TOPOLOGY_OUTPUT=json).
fn run_describe_with_env(args: &[&str], env: &[(&str, &str)]) -> (Vec<u8>, Vec<u8>, bool) {
  let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
  let mut cmd = Command::new(cargo.as_str());
  cmd
    .args(["run", "--quiet", "--bin", "describe_topology", "--"])
    .args(args)
    .env_remove("TOPOLOGY_OUTPUT")
    .current_dir(env!("CARGO_MANIFEST_DIR"));
  for (k, v) in env {
    cmd.env(k, v);
  }
  let out = cmd.output().expect("cargo run --bin describe_topology");
  (out.stdout, out.stderr, out.status.success())
}

#[test]
fn integration_word_count_text_output() {
  let path = fixture("word_count.json");
  let path_str = path.to_str().expect("path");
  let (stdout, stderr, success) = run_describe(&[path_str]);
  assert!(
    success,
    "word_count.json should build: stderr={}",
    String::from_utf8_lossy(&stderr)
  );
  let out = String::from_utf8_lossy(&stdout);
  assert!(out.contains("Topology built"));
  assert!(out.contains("text-lines"));
  assert!(out.contains("count (processor)"));
  assert!(out.contains("counts-out (sink)"));
}

#[test]
fn integration_word_count_json_output() {
  let path = fixture("word_count.json");
  let path_str = path.to_str().expect("path");
  let (stdout, stderr, success) = run_describe(&["--json", path_str]);
  assert!(
    success,
    "word_count.json should build: stderr={}",
    String::from_utf8_lossy(&stderr)
  );
  let summary: streamweave_topology::TopologySummary =
    serde_json::from_slice(&stdout).expect("summary json");
  assert_eq!(summary.nodes.len(), 4);
  assert_eq!(summary.stores, vec!["counts".to_string()]);
  assert_eq!(
    summary.node("split").expect("split").children,
    vec!["count".to_string()]
  );
}

#[test]
fn integration_env_selects_json_output() {
  let path = fixture("word_count.json");
  let path_str = path.to_str().expect("path");
  let (stdout, _stderr, success) = run_describe_with_env(&[path_str], &[("TOPOLOGY_OUTPUT", "json")]);
  assert!(success);
  let parsed: serde_json::Value = serde_json::from_slice(&stdout).expect("json");
  assert_eq!(parsed["topics"], serde_json::json!(["text-lines"]));
}

#[test]
fn integration_missing_input_fails() {
  let path = fixture("missing_input.json");
  let path_str = path.to_str().expect("path");
  let (_stdout, stderr, success) = run_describe(&[path_str]);
  assert!(!success, "missing_input.json should fail (exit non-zero)");
  let err = String::from_utf8_lossy(&stderr);
  assert!(err.contains("Topology error"));
  assert!(err.contains("missing"));
}

#[test]
fn integration_missing_file_fails() {
  let path = fixture("does_not_exist.json");
  let path_str = path.to_str().expect("path");
  let (_stdout, stderr, success) = run_describe(&[path_str]);
  assert!(!success);
  assert!(String::from_utf8_lossy(&stderr).contains("Error reading"));
}

// ---- Library path: same fixtures through load_description ----

#[test]
fn integration_lib_word_count_builds() {
  let d = streamweave_topology::description_io::load_description(&fixture("word_count.json"))
    .expect("load");
  let t = d
    .to_builder(&streamweave_topology::ProcessorRegistry::with_defaults())
    .expect("register")
    .build()
    .expect("build");
  assert_eq!(t.sources().count(), 1);
  assert_eq!(t.processors().count(), 2);
  assert_eq!(t.sinks().count(), 1);
  assert!(t.node("count").expect("count").store("counts").is_some());
}

#[test]
fn integration_lib_missing_input_names_it() {
  let d = streamweave_topology::description_io::load_description(&fixture("missing_input.json"))
    .expect("load");
  let err = d
    .to_builder(&streamweave_topology::ProcessorRegistry::with_defaults())
    .expect("register")
    .build()
    .expect_err("build should fail");
  assert!(matches!(
    err,
    streamweave_topology::TopologyError::MissingInputs { ref missing, .. } if missing == &["missing".to_string()]
  ));
}
