//! Release catalog: what gets built, for which platforms, and how.
//!
//! A catalog is loaded from a TOML file (see [`Catalog::load`]) or taken from
//! the built-in release matrix ([`Catalog::builtin`]). It is validated once
//! on load so later phases can rely on:
//! - a non-empty product name without path separators
//! - a version that parses as semver (a single leading `v` is allowed)
//! - no duplicate platforms
//! - unique executable names per platform

mod builtin;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{Os, Platform, exe_name};

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read catalog {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse catalog: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("invalid release version '{version}': {source}")]
  Version {
    version: String,
    #[source]
    source: semver::Error,
  },

  #[error("invalid catalog: {0}")]
  Invalid(String),
}

/// One buildable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
  /// Module path handed to the toolchain (e.g., `github.com/decred/dcrd/cmd/dcrctl`).
  pub module: String,
  /// Directory the toolchain runs in, relative to the release working directory.
  /// Dependency resolution is scoped to this directory.
  pub build_dir: PathBuf,
}

impl Component {
  pub fn new(module: impl Into<String>, build_dir: impl Into<PathBuf>) -> Self {
    Self {
      module: module.into(),
      build_dir: build_dir.into(),
    }
  }
}

/// A linker-time `-X symbol=value` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
  pub symbol: String,
  pub value: String,
}

impl Stamp {
  pub fn new(symbol: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into(),
      value: value.into(),
    }
  }
}

/// Flags shared by every build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
  pub tags: Vec<String>,
  pub trimpath: bool,
  pub stamps: Vec<Stamp>,
}

impl Default for BuildSettings {
  fn default() -> Self {
    Self {
      tags: Vec::new(),
      trimpath: true,
      stamps: Vec::new(),
    }
  }
}

impl BuildSettings {
  /// Linker flags: an empty build ID followed by one `-X` per stamp.
  pub fn ldflags(&self) -> String {
    let mut flags = String::from("-buildid=");
    for stamp in &self.stamps {
      flags.push_str(&format!(" -X {}={}", stamp.symbol, stamp.value));
    }
    flags
  }

  /// Build tags joined the way the toolchain expects them.
  pub fn tags_arg(&self) -> String {
    self.tags.join(",")
  }
}

/// The full release matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
  pub product: String,
  pub version: String,
  #[serde(default)]
  pub build: BuildSettings,
  pub platforms: Vec<Platform>,
  pub components: Vec<Component>,
}

impl Catalog {
  /// The built-in release matrix.
  pub fn builtin() -> Self {
    builtin::catalog()
  }

  /// Load and validate a catalog from a TOML file.
  pub fn load(path: &Path) -> Result<Self, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_toml_str(&content)
  }

  /// Parse and validate a catalog from TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
    let catalog: Catalog = toml::from_str(content)?;
    catalog.validate()?;
    Ok(catalog)
  }

  /// Check the invariants the build and archive phases rely on.
  pub fn validate(&self) -> Result<(), CatalogError> {
    if self.product.is_empty() {
      return Err(CatalogError::Invalid("product must not be empty".to_string()));
    }
    if self.product.contains(['/', '\\']) {
      return Err(CatalogError::Invalid(format!(
        "product must not contain path separators: {}",
        self.product
      )));
    }

    let bare = self.version.strip_prefix('v').unwrap_or(&self.version);
    semver::Version::parse(bare).map_err(|source| CatalogError::Version {
      version: self.version.clone(),
      source,
    })?;

    if self.platforms.is_empty() {
      return Err(CatalogError::Invalid("at least one platform is required".to_string()));
    }
    if self.components.is_empty() {
      return Err(CatalogError::Invalid("at least one component is required".to_string()));
    }

    let mut seen = HashSet::new();
    for platform in &self.platforms {
      if !seen.insert(platform) {
        return Err(CatalogError::Invalid(format!("duplicate platform: {platform}")));
      }
    }

    for component in &self.components {
      let base = exe_name(&component.module, Os::Linux);
      if base.is_empty() || base == "." || base == ".." {
        return Err(CatalogError::Invalid(format!(
          "component module '{}' has no executable name",
          component.module
        )));
      }
    }

    for platform in &self.platforms {
      let mut names = HashSet::new();
      for component in &self.components {
        let exe = exe_name(&component.module, platform.os);
        if !names.insert(exe.clone()) {
          return Err(CatalogError::Invalid(format!(
            "components collide on executable name '{exe}' for {platform}"
          )));
        }
      }
    }

    for stamp in &self.build.stamps {
      if stamp.symbol.is_empty() || stamp.symbol.contains('=') || stamp.symbol.contains(char::is_whitespace) {
        return Err(CatalogError::Invalid(format!("invalid stamp symbol: '{}'", stamp.symbol)));
      }
    }

    Ok(())
  }

  /// Top-level directory name inside, and base name of, a platform's archive.
  pub fn archive_name(&self, platform: &Platform) -> String {
    format!("{}-{}-{}", self.product, platform.dir_name(), self.version)
  }

  /// File name of the checksum manifest for this release.
  pub fn manifest_file_name(&self) -> String {
    format!("manifest-{}.txt", self.version)
  }
}
