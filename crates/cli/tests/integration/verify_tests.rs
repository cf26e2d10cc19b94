//! `--verify` integration tests.

use predicates::prelude::*;

use super::common::{CATALOG, TestEnv};

fn released() -> TestEnv {
  let env = TestEnv::with_catalog(CATALOG);
  env.relbuild_cmd().assert().success();
  env
}

#[test]
fn verify_accepts_fresh_release() {
  let env = released();

  env
    .relbuild_cmd()
    .arg("--verify")
    .arg(env.path("archive/manifest-v0.1.0.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("example-linux-amd64-v0.1.0.tar.gz"))
    .stdout(predicate::str::contains("Archives checked: 2"));
}

#[test]
fn verify_detects_modified_archive() {
  let env = released();
  std::fs::write(env.path("archive/example-windows-amd64-v0.1.0.zip"), b"tampered").unwrap();

  env
    .relbuild_cmd()
    .arg("--verify")
    .arg(env.path("archive/manifest-v0.1.0.txt"))
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("example-windows-amd64-v0.1.0.zip: expected"))
    .stderr(predicate::str::contains("1 of 2 archive(s) failed verification"));
}

#[test]
fn verify_detects_missing_archive() {
  let env = released();
  std::fs::remove_file(env.path("archive/example-linux-amd64-v0.1.0.tar.gz")).unwrap();

  env
    .relbuild_cmd()
    .arg("--verify")
    .arg(env.path("archive/manifest-v0.1.0.txt"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("example-linux-amd64-v0.1.0.tar.gz: missing"));
}

#[test]
fn verify_rejects_malformed_manifest() {
  let env = TestEnv::empty();
  let manifest = env.path("manifest-v0.1.0.txt");
  std::fs::write(&manifest, "not a checksum line\n").unwrap();

  env
    .relbuild_cmd()
    .arg("--verify")
    .arg(&manifest)
    .assert()
    .failure()
    .stderr(predicate::str::contains("line 1"));
}

#[test]
fn verify_json_lists_each_entry() {
  let env = released();

  let output = env
    .relbuild_cmd()
    .arg("--verify")
    .arg(env.path("archive/manifest-v0.1.0.txt"))
    .args(["--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let results = report["results"].as_array().unwrap();
  assert_eq!(results.len(), 2);
  assert_eq!(results[0][1]["status"], "ok");
}
