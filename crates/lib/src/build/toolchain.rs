//! Toolchain discovery.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::build::BuildError;
use crate::consts::DEFAULT_TOOLCHAIN;

/// The compiler driver used for every build in a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  path: PathBuf,
}

impl Toolchain {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Look up the default toolchain on `PATH`.
  ///
  /// Falls back to the bare program name when it cannot be found; the
  /// failure then surfaces on the first invocation.
  pub fn discover() -> Self {
    match which::which(DEFAULT_TOOLCHAIN) {
      Ok(path) => Self { path },
      Err(e) => {
        debug!(program = DEFAULT_TOOLCHAIN, error = %e, "toolchain not found on PATH");
        Self::new(DEFAULT_TOOLCHAIN)
      }
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Run `<toolchain> version` and return its trimmed output.
  pub fn version(&self) -> Result<String, BuildError> {
    let output = Command::new(&self.path)
      .arg("version")
      .stdin(Stdio::null())
      .output()
      .map_err(|source| BuildError::Spawn {
        program: self.path.display().to_string(),
        source,
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stderr.is_empty() {
        debug!(stderr = %stderr, "command stderr");
      }
      return Err(BuildError::CmdFailed {
        cmd: format!("{} version", self.path.display()),
        code: output.status.code(),
      });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}
