//! Error types for toolchain invocations.

use thiserror::Error;

use crate::platform::Platform;

/// Errors that can occur while running the toolchain.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The toolchain binary could not be started (missing, not executable, ...).
  #[error("failed to run toolchain {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// A build exited unsuccessfully.
  #[error("build of {module} for {platform} failed with exit code {code:?}:\n{output}")]
  Failed {
    module: String,
    platform: Platform,
    code: Option<i32>,
    output: String,
  },

  /// A non-build toolchain command (e.g., `version`) exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// I/O error while capturing toolchain output.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
