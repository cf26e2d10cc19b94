//! Test utilities for relbuild-lib.
//!
//! Provides a fake toolchain so builds can be exercised without a real
//! compiler installed.

use std::fs;
use std::path::{Path, PathBuf};

/// Stand-in for `go`.
///
/// - `version` prints a fixed version line.
/// - `build ... -o <out> ... <module>` writes a one-line description of the
///   target environment to `<out>` and touches `.built-here` in the working
///   directory.
/// - A module whose last segment is `fail`, or `fail-<GOOS>` for the
///   current target, exits 2 after printing to stderr.
pub const FAKE_TOOLCHAIN_SCRIPT: &str = r#"#!/bin/sh
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
  */fail|*/fail-"$GOOS") echo "cannot build $module" >&2; exit 2 ;;
esac
echo "compiling $module"
touch .built-here
mkdir -p "$(dirname "$out")"
printf '%s %s cgo=%s goflags=%s module=%s\n' "$GOOS" "$GOARCH" "$CGO_ENABLED" "$GOFLAGS" "$module" > "$out"
"#;

/// A toolchain that always fails.
pub const FAILING_SCRIPT: &str = "#!/bin/sh\necho broken >&2\nexit 3\n";

/// Write an executable script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  fs::write(&path, content).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Install the fake toolchain into `dir` and return its path.
#[cfg(unix)]
pub fn fake_toolchain(dir: &Path) -> PathBuf {
  write_script(dir, "go", FAKE_TOOLCHAIN_SCRIPT)
}

/// Create placeholder executables under `bin_dir/<os>-<arch>/` as if a build
/// had already run.
pub fn stage_executables(bin_dir: &Path, platform_dir: &str, names: &[&str]) {
  let dir = bin_dir.join(platform_dir);
  fs::create_dir_all(&dir).unwrap();
  for name in names {
    fs::write(dir.join(name), format!("binary {name}\n")).unwrap();
  }
}
