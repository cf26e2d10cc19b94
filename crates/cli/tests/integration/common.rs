//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for `go`: answers `version`, and for `build` writes the target
/// environment into the `-o` path. Modules ending in `/fail` exit 2.
const FAKE_GO: &str = r#"#!/bin/sh
if [ "$1" = "version" ]; then
  echo "go version go1.22.0 fake/fake"
  exit 0
fi
out=""
module=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    -tags|-ldflags) shift ;;
    build|-trimpath) ;;
    *) module="$1" ;;
  esac
  shift
done
case "$module" in
  */fail) echo "cannot build $module" >&2; exit 2 ;;
esac
mkdir -p "$(dirname "$out")"
printf '%s %s cgo=%s goflags=%s\n' "$GOOS" "$GOARCH" "$CGO_ENABLED" "$GOFLAGS" > "$out"
"#;

/// Two platforms, one per archive format, and two components.
pub const CATALOG: &str = r#"
product = "example"
version = "v0.1.0"

[build]
tags = ["netgo"]

[[platforms]]
os = "linux"
arch = "amd64"

[[platforms]]
os = "windows"
arch = "amd64"

[[components]]
module = "example/foo"
build_dir = "."

[[components]]
module = "example/cmd/bar"
build_dir = "."
"#;

/// Isolated release working directory with a fake toolchain next to it.
pub struct TestEnv {
  pub temp: TempDir,
  pub work_dir: PathBuf,
  pub toolchain: PathBuf,
}

impl TestEnv {
  /// Working directory containing `release.toml` with `catalog`.
  pub fn with_catalog(catalog: &str) -> Self {
    let env = Self::empty();
    std::fs::write(env.work_dir.join("release.toml"), catalog).unwrap();
    env
  }

  pub fn empty() -> Self {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let work_dir = temp.path().join("work");
    std::fs::create_dir_all(&work_dir).unwrap();
    let work_dir = dunce::canonicalize(&work_dir).unwrap_or(work_dir);

    let toolchain = temp.path().join("go");
    std::fs::write(&toolchain, FAKE_GO).unwrap();
    std::fs::set_permissions(&toolchain, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self {
      temp,
      work_dir,
      toolchain,
    }
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.work_dir.join(relative)
  }

  /// A `relbuild` command pointed at this environment's working directory and toolchain.
  pub fn relbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("relbuild");
    cmd.arg("-C").arg(&self.work_dir).arg("--go").arg(&self.toolchain);
    // inherited flags must not reach the toolchain
    cmd.env("GOFLAGS", "-mod=vendor");
    cmd
  }
}

/// Entry paths of a tar.gz archive, in order.
pub fn tar_entries(path: &Path) -> Vec<String> {
  let file = std::fs::File::open(path).unwrap();
  let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
  archive
    .entries()
    .unwrap()
    .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
    .collect()
}
