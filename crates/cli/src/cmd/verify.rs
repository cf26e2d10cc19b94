//! Implementation of `relbuild --verify`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use relbuild_lib::manifest::{EntryStatus, verify_manifest};

use crate::output::{OutputFormat, Status, field, json, short_digest, status};

/// Recompute every archive digest listed in `manifest` and fail if any differ.
pub fn cmd_verify(manifest: &Path, output: OutputFormat) -> Result<()> {
  let report = verify_manifest(manifest).with_context(|| format!("Failed to verify manifest: {}", manifest.display()))?;

  if output.is_json() {
    json(&report)?;
  } else {
    for (entry, outcome) in &report.results {
      match outcome {
        EntryStatus::Ok => status(Status::Done, &format!("{} {}", entry.file_name, short_digest(&entry.digest))),
        EntryStatus::Mismatch { actual } => status(
          Status::Warn,
          &format!(
            "{}: expected {}, got {}",
            entry.file_name,
            short_digest(&entry.digest),
            short_digest(actual)
          ),
        ),
        EntryStatus::Missing => status(Status::Warn, &format!("{}: missing", entry.file_name)),
      }
    }
    println!();
    field("Archives checked", &report.results.len().to_string());
  }

  let failed = report.failures().count();
  if failed > 0 {
    bail!("{} of {} archive(s) failed verification", failed, report.results.len());
  }

  Ok(())
}
