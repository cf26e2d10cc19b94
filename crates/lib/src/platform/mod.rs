//! Cross-compilation targets.

pub mod arch;
pub mod os;

pub use arch::Arch;
pub use os::Os;

use std::fmt;

use serde::{Deserialize, Serialize};

/// One cross-compilation target (e.g., "linux-amd64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Returns the `<os>-<arch>` name used for output directories and archive names.
  pub fn dir_name(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.dir_name())
  }
}

/// Executable file name for a module built for `os`.
///
/// The name is the final `/`-separated segment of the module path, with the
/// OS executable suffix appended.
pub fn exe_name(module: &str, os: Os) -> String {
  let base = module.trim_end_matches('/').rsplit('/').next().unwrap_or(module);
  format!("{}{}", base, os.exe_suffix())
}
