//! Checking archives against a manifest.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use super::{Manifest, ManifestEntry, ManifestError};
use crate::util::hash::{Sha256Sum, hash_file};

/// Outcome for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
  Ok,
  Mismatch { actual: Sha256Sum },
  Missing,
}

/// Per-entry results of [`verify_manifest`].
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
  pub manifest: PathBuf,
  pub results: Vec<(ManifestEntry, EntryStatus)>,
}

impl VerifyReport {
  pub fn is_success(&self) -> bool {
    self.results.iter().all(|(_, status)| *status == EntryStatus::Ok)
  }

  pub fn failures(&self) -> impl Iterator<Item = &(ManifestEntry, EntryStatus)> {
    self.results.iter().filter(|(_, status)| *status != EntryStatus::Ok)
  }
}

/// Recompute the digest of every archive listed in the manifest at `path`.
///
/// Archives are resolved relative to the manifest's directory. Mismatched or
/// missing archives are reported, not returned as errors.
pub fn verify_manifest(path: &Path) -> Result<VerifyReport, ManifestError> {
  let manifest = Manifest::load(path)?;
  let dir = path.parent().unwrap_or(Path::new("."));

  let mut results = Vec::with_capacity(manifest.len());
  for entry in manifest.entries() {
    let archive = dir.join(&entry.file_name);
    let status = match hash_file(&archive) {
      Ok(actual) if actual == entry.digest => {
        debug!(file = %entry.file_name, "checksum ok");
        EntryStatus::Ok
      }
      Ok(actual) => {
        warn!(file = %entry.file_name, expected = %entry.digest, actual = %actual, "checksum mismatch");
        EntryStatus::Mismatch { actual }
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        warn!(file = %entry.file_name, "archive missing");
        EntryStatus::Missing
      }
      Err(source) => {
        return Err(ManifestError::Read {
          path: archive.display().to_string(),
          source,
        });
      }
    };
    results.push((entry.clone(), status));
  }

  Ok(VerifyReport {
    manifest: path.to_path_buf(),
    results,
  })
}
