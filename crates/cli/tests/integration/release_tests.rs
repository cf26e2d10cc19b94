//! Release run integration tests.

use predicates::prelude::*;

use super::common::{CATALOG, TestEnv, tar_entries};

#[test]
fn release_builds_archives_and_checksums() {
  let env = TestEnv::with_catalog(CATALOG);

  env
    .relbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Released example v0.1.0"))
    .stdout(predicate::str::contains("Executables built: 4"))
    .stdout(predicate::str::contains("example-windows-amd64-v0.1.0.zip"));

  for exe in [
    "bin/linux-amd64/foo",
    "bin/linux-amd64/bar",
    "bin/windows-amd64/foo.exe",
    "bin/windows-amd64/bar.exe",
  ] {
    assert!(env.path(exe).is_file(), "{exe} missing");
  }

  let tarball = env.path("archive/example-linux-amd64-v0.1.0.tar.gz");
  assert_eq!(
    tar_entries(&tarball),
    vec![
      "example-linux-amd64-v0.1.0/",
      "example-linux-amd64-v0.1.0/foo",
      "example-linux-amd64-v0.1.0/bar",
    ]
  );
  assert!(env.path("archive/example-windows-amd64-v0.1.0.zip").is_file());

  let manifest = std::fs::read_to_string(env.path("archive/manifest-v0.1.0.txt")).unwrap();
  let lines: Vec<&str> = manifest.lines().collect();
  assert_eq!(lines.len(), 2);
  assert!(lines[0].ends_with("  example-linux-amd64-v0.1.0.tar.gz"));
  assert!(lines[1].ends_with("  example-windows-amd64-v0.1.0.zip"));
  assert_eq!(lines[0].find(' '), Some(64));
}

#[test]
fn toolchain_sees_only_target_env() {
  let env = TestEnv::with_catalog(CATALOG);

  env.relbuild_cmd().arg("--noarchive").assert().success();

  let linux = std::fs::read_to_string(env.path("bin/linux-amd64/foo")).unwrap();
  assert_eq!(linux, "linux amd64 cgo=0 goflags=\n");
  let windows = std::fs::read_to_string(env.path("bin/windows-amd64/bar.exe")).unwrap();
  assert_eq!(windows, "windows amd64 cgo=0 goflags=\n");
}

#[test]
fn noarchive_writes_no_manifest() {
  let env = TestEnv::with_catalog(CATALOG);

  env
    .relbuild_cmd()
    .arg("--noarchive")
    .assert()
    .success()
    .stdout(predicate::str::contains("Manifest: none"));

  assert!(env.path("bin/linux-amd64/foo").is_file());
  assert!(!env.path("archive").exists());
}

#[test]
fn nobuild_reuses_previous_outputs() {
  let env = TestEnv::with_catalog(CATALOG);

  env.relbuild_cmd().arg("--noarchive").assert().success();

  env
    .relbuild_cmd()
    .arg("--nobuild")
    .assert()
    .success()
    .stdout(predicate::str::contains("Executables built: 0"));

  assert!(env.path("archive/manifest-v0.1.0.txt").is_file());
}

#[test]
fn nobuild_without_outputs_fails() {
  let env = TestEnv::with_catalog(CATALOG);

  env
    .relbuild_cmd()
    .arg("--nobuild")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("missing build output"));
}

#[test]
fn build_failure_aborts_release() {
  let env = TestEnv::with_catalog(&CATALOG.replace("example/cmd/bar", "example/fail"));

  env
    .relbuild_cmd()
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("example/fail"))
    .stderr(predicate::str::contains("cannot build example/fail"));

  // first component of the first platform was built, nothing after the failure
  assert!(env.path("bin/linux-amd64/foo").is_file());
  assert!(!env.path("bin/windows-amd64").exists());
  assert!(!env.path("archive/manifest-v0.1.0.txt").exists());
}

#[test]
fn custom_output_directories() {
  let env = TestEnv::with_catalog(CATALOG);

  env
    .relbuild_cmd()
    .args(["--bin-dir", "out/exe", "--archive-dir", "dist"])
    .assert()
    .success();

  assert!(env.path("out/exe/linux-amd64/foo").is_file());
  assert!(env.path("dist/manifest-v0.1.0.txt").is_file());
  assert!(!env.path("bin").exists());
}

#[test]
fn explicit_catalog_overrides_release_toml() {
  let env = TestEnv::with_catalog("not = [valid");
  let catalog = env.temp.path().join("other.toml");
  std::fs::write(&catalog, CATALOG.replace("v0.1.0", "v0.2.0")).unwrap();

  env.relbuild_cmd().arg("--catalog").arg(&catalog).assert().success();

  assert!(env.path("archive/manifest-v0.2.0.txt").is_file());
}

#[test]
fn json_output_reports_archives() {
  let env = TestEnv::with_catalog(CATALOG);

  let output = env.relbuild_cmd().args(["--output", "json"]).output().unwrap();
  assert!(output.status.success());

  let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(summary["product"], "example");
  assert_eq!(summary["version"], "v0.1.0");
  assert_eq!(summary["built"].as_array().unwrap().len(), 4);

  let archives = summary["archives"].as_array().unwrap();
  assert_eq!(archives.len(), 2);
  assert_eq!(archives[0]["format"], "tar-gz");
  assert_eq!(archives[1]["format"], "zip");
  assert_eq!(archives[1]["entry"]["file_name"], "example-windows-amd64-v0.1.0.zip");
  assert_eq!(archives[1]["entry"]["digest"].as_str().unwrap().len(), 64);
}

#[test]
fn rerun_is_reproducible() {
  let env = TestEnv::with_catalog(CATALOG);
  let manifest = env.path("archive/manifest-v0.1.0.txt");

  env.relbuild_cmd().assert().success();
  let first = std::fs::read_to_string(&manifest).unwrap();
  env.relbuild_cmd().assert().success();
  let second = std::fs::read_to_string(&manifest).unwrap();

  assert_eq!(first, second);
}
