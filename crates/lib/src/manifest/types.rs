//! Manifest types and the line format.
//!
//! # Format
//!
//! ```text
//! 3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b  decred-linux-amd64-v1.5.0-rc1.tar.gz
//! ```
//!
//! 64 lowercase hex characters, exactly two ASCII spaces, the archive's base
//! file name, `\n`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::util::hash::Sha256Sum;

/// Errors that can occur while writing or reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to write manifest {path}: {source}")]
  Write {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed manifest line {line}: {message}")]
  Parse { line: usize, message: String },
}

/// One archive and its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
  pub file_name: String,
  pub digest: Sha256Sum,
}

impl ManifestEntry {
  pub fn new(file_name: impl Into<String>, digest: Sha256Sum) -> Self {
    Self {
      file_name: file_name.into(),
      digest,
    }
  }

  /// The manifest line for this entry, including the trailing newline.
  pub fn line(&self) -> String {
    format!("{}  {}\n", self.digest.to_hex(), self.file_name)
  }
}

/// Ordered manifest entries for one release run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
  entries: Vec<ManifestEntry>,
}

impl Manifest {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, entry: ManifestEntry) {
    self.entries.push(entry);
  }

  pub fn entries(&self) -> &[ManifestEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Write every line, in order, to `w`.
  pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
    for entry in &self.entries {
      w.write_all(entry.line().as_bytes())?;
    }
    Ok(())
  }

  /// Write the manifest to `dir/file_name`.
  ///
  /// An empty manifest writes nothing and returns `Ok(None)`.
  pub fn write(&self, dir: &Path, file_name: &str) -> Result<Option<PathBuf>, ManifestError> {
    if self.is_empty() {
      return Ok(None);
    }

    let path = dir.join(file_name);
    let write_err = |source| ManifestError::Write {
      path: path.display().to_string(),
      source,
    };

    info!(path = %path.display(), "manifest");
    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    self.write_to(&mut writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(Some(path))
  }

  /// Parse manifest text in the format produced by [`write_to`](Self::write_to).
  pub fn parse(content: &str) -> Result<Self, ManifestError> {
    let mut manifest = Self::new();
    for (index, line) in content.lines().enumerate() {
      let line_no = index + 1;
      if line.is_empty() {
        continue;
      }
      let parse_err = |message: &str| ManifestError::Parse {
        line: line_no,
        message: message.to_string(),
      };

      let (hex, name) = line
        .split_once("  ")
        .ok_or_else(|| parse_err("expected '<sha256>  <file name>'"))?;
      if hex.len() != 64 || hex.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(parse_err("digest must be 64 lowercase hex characters"));
      }
      let digest: Sha256Sum = hex.parse().map_err(|_| parse_err("digest is not valid hex"))?;
      if name.is_empty() || name.contains(['/', '\\']) {
        return Err(parse_err("file name must be a non-empty base name"));
      }

      manifest.push(ManifestEntry::new(name, digest));
    }
    Ok(manifest)
  }

  /// Read and parse a manifest file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.display().to_string(),
      source,
    })?;
    Self::parse(&content)
  }
}
