use std::fmt;

use serde::{Deserialize, Serialize};

/// Target operating systems, named by their toolchain identifier (`GOOS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Darwin,
  Dragonfly,
  FreeBsd,
  Illumos,
  Linux,
  NetBsd,
  OpenBsd,
  Solaris,
  Windows,
}

impl Os {
  /// Returns the toolchain identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Darwin => "darwin",
      Self::Dragonfly => "dragonfly",
      Self::FreeBsd => "freebsd",
      Self::Illumos => "illumos",
      Self::Linux => "linux",
      Self::NetBsd => "netbsd",
      Self::OpenBsd => "openbsd",
      Self::Solaris => "solaris",
      Self::Windows => "windows",
    }
  }

  /// Suffix appended to executables built for this OS.
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      _ => "",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_windows_has_exe_suffix() {
    assert_eq!(Os::Windows.exe_suffix(), ".exe");
    for os in [Os::Darwin, Os::FreeBsd, Os::Linux, Os::OpenBsd, Os::Solaris] {
      assert_eq!(os.exe_suffix(), "", "{os} should not have a suffix");
    }
  }

  #[test]
  fn serde_uses_toolchain_identifiers() {
    #[derive(Deserialize)]
    struct Wrapper {
      os: Os,
    }
    let w: Wrapper = toml::from_str(r#"os = "freebsd""#).unwrap();
    assert_eq!(w.os, Os::FreeBsd);
    assert_eq!(w.os.as_str(), "freebsd");
  }
}
