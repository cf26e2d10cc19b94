//! The built-in release matrix.

use super::{BuildSettings, Catalog, Component, Stamp};
use crate::platform::{Arch, Os, Platform};

const PRODUCT: &str = "decred";
const VERSION: &str = "v1.5.0-rc1";

const PLATFORMS: &[(Os, Arch)] = &[
  (Os::Darwin, Arch::Amd64),
  (Os::FreeBsd, Arch::Amd64),
  (Os::Linux, Arch::I386),
  (Os::Linux, Arch::Amd64),
  (Os::Linux, Arch::Arm64),
  (Os::OpenBsd, Arch::Amd64),
  (Os::Windows, Arch::I386),
  (Os::Windows, Arch::Amd64),
];

const COMPONENTS: &[(&str, &str)] = &[
  ("decred.org/dcrwallet", "dcrwallet"),
  ("github.com/decred/dcrd", "dcrd"),
  ("github.com/decred/dcrd/cmd/dcrctl", "dcrd"),
  ("github.com/decred/dcrd/cmd/promptsecret", "dcrd"),
  ("github.com/decred/dcrlnd/cmd/dcrlnd", "dcrlnd"),
];

/// Packages whose `BuildMetadata`/`PreRelease` variables are stamped at link time.
const STAMPED: &[&str] = &[
  "github.com/decred/dcrd/internal/version",
  "github.com/decred/dcrwallet/version",
  "github.com/decred/dcrlnd/build",
];

pub(super) fn catalog() -> Catalog {
  let mut stamps = Vec::with_capacity(STAMPED.len() * 2);
  for package in STAMPED {
    stamps.push(Stamp::new(format!("{package}.BuildMetadata"), "release"));
    stamps.push(Stamp::new(format!("{package}.PreRelease"), "rc1"));
  }

  Catalog {
    product: PRODUCT.to_string(),
    version: VERSION.to_string(),
    build: BuildSettings {
      tags: vec!["safe".to_string(), "netgo".to_string()],
      trimpath: true,
      stamps,
    },
    platforms: PLATFORMS.iter().map(|&(os, arch)| Platform::new(os, arch)).collect(),
    components: COMPONENTS
      .iter()
      .map(|&(module, build_dir)| Component::new(module, build_dir))
      .collect(),
  }
}
