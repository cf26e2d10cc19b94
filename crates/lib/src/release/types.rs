//! Options, results, and errors for a release run.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::archive::{ArchiveError, ArchiveOutput};
use crate::build::{BuildError, Toolchain};
use crate::catalog::CatalogError;
use crate::consts::{DEFAULT_ARCHIVE_DIR, DEFAULT_BIN_DIR};
use crate::manifest::ManifestError;

/// Options for a release run.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
  /// Directory component build directories are relative to.
  pub work_dir: PathBuf,
  /// Root for built executables.
  pub bin_dir: PathBuf,
  /// Directory receiving archives and the manifest.
  pub archive_dir: PathBuf,
  pub toolchain: Toolchain,
  /// Reuse executables from an earlier run instead of building.
  pub skip_build: bool,
  /// Build only; no archives and no manifest.
  pub skip_archive: bool,
}

impl ReleaseOptions {
  /// Default layout under `work_dir`: `bin/` and `archive/`, toolchain from `PATH`.
  ///
  /// A relative `work_dir` is taken from the process's current directory.
  pub fn new(work_dir: impl Into<PathBuf>) -> Self {
    let work_dir = work_dir.into();
    let work_dir = std::path::absolute(&work_dir).unwrap_or(work_dir);
    Self {
      bin_dir: work_dir.join(DEFAULT_BIN_DIR),
      archive_dir: work_dir.join(DEFAULT_ARCHIVE_DIR),
      work_dir,
      toolchain: Toolchain::discover(),
      skip_build: false,
      skip_archive: false,
    }
  }

  pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
    self.toolchain = toolchain;
    self
  }

  /// Set the output root; relative paths are taken from the working directory.
  pub fn with_bin_dir(mut self, dir: &Path) -> Self {
    self.bin_dir = self.work_dir.join(dir);
    self
  }

  /// Set the archive directory; relative paths are taken from the working directory.
  pub fn with_archive_dir(mut self, dir: &Path) -> Self {
    self.archive_dir = self.work_dir.join(dir);
    self
  }

  /// Copy with every directory absolute.
  ///
  /// The toolchain runs from a component's build directory, so a relative
  /// `-o` would land below it instead of under `bin_dir`.
  pub fn resolved(&self) -> Result<Self, ReleaseError> {
    let absolute = |path: &Path| {
      std::path::absolute(path).map_err(|source| ReleaseError::Resolve {
        path: path.display().to_string(),
        source,
      })
    };

    Ok(Self {
      work_dir: absolute(&self.work_dir)?,
      bin_dir: absolute(&self.bin_dir)?,
      archive_dir: absolute(&self.archive_dir)?,
      ..self.clone()
    })
  }
}

/// What a release run produced.
#[derive(Debug, Default, Serialize)]
pub struct ReleaseReport {
  /// Output of `<toolchain> version`, when the build phase ran.
  pub toolchain_version: Option<String>,
  /// Built executables, in build order.
  pub built: Vec<PathBuf>,
  /// Archives, in platform order.
  pub archives: Vec<ArchiveOutput>,
  /// Manifest path, if one was written.
  pub manifest: Option<PathBuf>,
}

/// Errors that abort a release run.
#[derive(Debug, Error)]
pub enum ReleaseError {
  #[error("catalog error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("build error: {0}")]
  Build(#[from] BuildError),

  #[error("archive error: {0}")]
  Archive(#[from] ArchiveError),

  #[error("manifest error: {0}")]
  Manifest(#[from] ManifestError),

  #[error("failed to resolve {path}: {source}")]
  Resolve {
    path: String,
    #[source]
    source: io::Error,
  },
}
