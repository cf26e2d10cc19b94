use std::fmt;

use serde::{Deserialize, Serialize};

/// Target CPU architectures, named by their toolchain identifier (`GOARCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arch {
  #[serde(rename = "386")]
  I386,
  #[serde(rename = "amd64")]
  Amd64,
  #[serde(rename = "arm")]
  Arm,
  #[serde(rename = "arm64")]
  Arm64,
  #[serde(rename = "loong64")]
  Loong64,
  #[serde(rename = "mips64")]
  Mips64,
  #[serde(rename = "ppc64le")]
  Ppc64le,
  #[serde(rename = "riscv64")]
  Riscv64,
  #[serde(rename = "s390x")]
  S390x,
}

impl Arch {
  /// Returns the toolchain identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::I386 => "386",
      Self::Amd64 => "amd64",
      Self::Arm => "arm",
      Self::Arm64 => "arm64",
      Self::Loong64 => "loong64",
      Self::Mips64 => "mips64",
      Self::Ppc64le => "ppc64le",
      Self::Riscv64 => "riscv64",
      Self::S390x => "s390x",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
