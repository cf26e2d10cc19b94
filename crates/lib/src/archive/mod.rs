//! Packaging a platform's executables into one distributable archive.
//!
//! The container format depends only on the target OS: Windows gets a zip
//! with deflate-compressed entries, everything else a gzip-compressed tar.
//! Either way the archive holds a single top-level directory named
//! `<product>-<os>-<arch>-<version>` containing one entry per component.
//!
//! The SHA-256 recorded in the manifest is computed by a [`HashingWriter`]
//! sitting directly in front of the output file, so it covers exactly the
//! bytes written and the archive is never read back.
//!
//! [`HashingWriter`]: crate::util::hash::HashingWriter

mod tarball;
mod zipfile;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::build::builder::executable_path;
use crate::catalog::Catalog;
use crate::manifest::ManifestEntry;
use crate::platform::{Os, Platform, exe_name};
use crate::util::hash::Sha256Sum;

/// Errors that can occur while writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
  #[error("failed to create archive directory {path}: {source}")]
  CreateDir {
    path: String,
    #[source]
    source: std::io::Error,
  },

  /// A build output is absent. Archiving assumes the build phase already ran.
  #[error("missing build output {path}")]
  MissingExecutable { path: String },

  #[error("failed to read {path}: {source}")]
  ReadExecutable {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write archive {path}: {source}")]
  Write {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write zip archive {path}: {source}")]
  Zip {
    path: String,
    #[source]
    source: zip::result::ZipError,
  },
}

/// Container format of a platform archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
  TarGz,
  Zip,
}

impl ArchiveFormat {
  pub fn for_os(os: Os) -> Self {
    match os {
      Os::Windows => Self::Zip,
      _ => Self::TarGz,
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      Self::TarGz => ".tar.gz",
      Self::Zip => ".zip",
    }
  }
}

impl fmt::Display for ArchiveFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension().trim_start_matches('.'))
  }
}

/// One file to place in an archive.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
  /// Entry name relative to the archive's top-level directory.
  pub name: String,
  pub source: PathBuf,
  pub size: u64,
}

impl ArchiveMember {
  /// Describe `source` as entry `name`, failing if it does not exist.
  pub fn from_path(name: impl Into<String>, source: &Path) -> Result<Self, ArchiveError> {
    let metadata = match fs::metadata(source) {
      Ok(m) if m.is_file() => m,
      Ok(_) => {
        return Err(ArchiveError::MissingExecutable {
          path: source.display().to_string(),
        });
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(ArchiveError::MissingExecutable {
          path: source.display().to_string(),
        });
      }
      Err(source_err) => {
        return Err(ArchiveError::ReadExecutable {
          path: source.display().to_string(),
          source: source_err,
        });
      }
    };

    Ok(Self {
      name: name.into(),
      source: source.to_path_buf(),
      size: metadata.len(),
    })
  }
}

/// Digest and length of a finished archive.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Written {
  pub digest: Sha256Sum,
  pub size: u64,
}

/// A finished archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveOutput {
  pub platform: Platform,
  pub format: ArchiveFormat,
  pub path: PathBuf,
  pub size: u64,
  pub entry: ManifestEntry,
}

/// Write `members` under `top_dir/` into `dest` using `format`.
///
/// `dest`'s parent directory must exist; the zip path stages its container
/// there before streaming it into `dest`.
pub fn write_archive(
  format: ArchiveFormat,
  dest: &Path,
  top_dir: &str,
  members: &[ArchiveMember],
) -> Result<(Sha256Sum, u64), ArchiveError> {
  let written = match format {
    ArchiveFormat::TarGz => tarball::write_tar_gz(dest, top_dir, members)?,
    ArchiveFormat::Zip => zipfile::write_zip(dest, top_dir, members)?,
  };
  Ok((written.digest, written.size))
}

/// Packages every component of a catalog for one platform at a time.
#[derive(Debug, Clone)]
pub struct Archiver<'a> {
  catalog: &'a Catalog,
  bin_dir: &'a Path,
  archive_dir: &'a Path,
}

impl<'a> Archiver<'a> {
  pub fn new(catalog: &'a Catalog, bin_dir: &'a Path, archive_dir: &'a Path) -> Self {
    Self {
      catalog,
      bin_dir,
      archive_dir,
    }
  }

  /// Path of the archive for `platform`.
  pub fn archive_path(&self, platform: &Platform) -> PathBuf {
    let format = ArchiveFormat::for_os(platform.os);
    self
      .archive_dir
      .join(format!("{}{}", self.catalog.archive_name(platform), format.extension()))
  }

  /// Archive all of `platform`'s executables and return the manifest entry for it.
  ///
  /// Every executable must already exist; a missing one fails before the
  /// archive file is created.
  pub fn archive(&self, platform: &Platform) -> Result<ArchiveOutput, ArchiveError> {
    fs::create_dir_all(self.archive_dir).map_err(|source| ArchiveError::CreateDir {
      path: self.archive_dir.display().to_string(),
      source,
    })?;

    let members = self
      .catalog
      .components
      .iter()
      .map(|component| {
        let source = executable_path(self.bin_dir, component, platform);
        ArchiveMember::from_path(exe_name(&component.module, platform.os), &source)
      })
      .collect::<Result<Vec<_>, _>>()?;

    let format = ArchiveFormat::for_os(platform.os);
    let path = self.archive_path(platform);
    info!(path = %path.display(), "archive");

    let top_dir = self.catalog.archive_name(platform);
    let (digest, size) = write_archive(format, &path, &top_dir, &members)?;

    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();

    Ok(ArchiveOutput {
      platform: *platform,
      format,
      size,
      entry: ManifestEntry::new(file_name, digest),
      path,
    })
  }
}
