//! Implementation of the default `relbuild` command.
//!
//! Builds every component for every platform in the catalog, packages each
//! platform into an archive, and writes the checksum manifest.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use relbuild_lib::build::Toolchain;
use relbuild_lib::consts::CATALOG_FILENAME;
use relbuild_lib::{Catalog, ReleaseOptions, ReleaseReport, run_release};

use crate::output::{OutputFormat, Status, archive_size, elapsed, field, json, status};

/// Release flags as parsed from the command line.
pub struct ReleaseArgs {
  pub toolchain: Option<PathBuf>,
  pub nobuild: bool,
  pub noarchive: bool,
  pub catalog: Option<PathBuf>,
  pub dir: PathBuf,
  pub bin_dir: Option<PathBuf>,
  pub archive_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct ReleaseSummary<'a> {
  product: &'a str,
  version: &'a str,
  #[serde(flatten)]
  report: &'a ReleaseReport,
}

pub fn cmd_release(args: ReleaseArgs, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let work_dir = dunce::canonicalize(&args.dir)
    .with_context(|| format!("Failed to resolve working directory: {}", args.dir.display()))?;

  let catalog = load_catalog(args.catalog.as_deref(), &work_dir)?;

  let mut options = ReleaseOptions::new(&work_dir);
  if let Some(path) = args.toolchain {
    options = options.with_toolchain(Toolchain::new(path));
  }
  if let Some(dir) = args.bin_dir.as_deref() {
    options = options.with_bin_dir(dir);
  }
  if let Some(dir) = args.archive_dir.as_deref() {
    options = options.with_archive_dir(dir);
  }
  options.skip_build = args.nobuild;
  options.skip_archive = args.noarchive;

  let report = run_release(&catalog, &options)
    .with_context(|| format!("Release of {} {} failed", catalog.product, catalog.version))?;

  if output.is_json() {
    json(&ReleaseSummary {
      product: &catalog.product,
      version: &catalog.version,
      report: &report,
    })?;
    return Ok(());
  }

  println!();
  status(Status::Done, &format!("Released {} {}", catalog.product, catalog.version));
  if let Some(version) = &report.toolchain_version {
    field("Toolchain", version);
  }
  field("Platforms", &catalog.platforms.len().to_string());
  field("Executables built", &report.built.len().to_string());
  field("Archives", &report.archives.len().to_string());
  for archive in &report.archives {
    status(Status::Item, &format!("{} ({})", archive.entry.file_name, archive_size(archive.size)));
  }
  match &report.manifest {
    Some(path) => field("Manifest", &path.display().to_string()),
    None => field("Manifest", "none"),
  }
  field("Duration", &elapsed(start.elapsed()));

  Ok(())
}

/// An explicit catalog path wins; otherwise `release.toml` in the working
/// directory, otherwise the built-in matrix.
fn load_catalog(explicit: Option<&Path>, work_dir: &Path) -> Result<Catalog> {
  if let Some(path) = explicit {
    return Catalog::load(path).with_context(|| format!("Failed to load catalog: {}", path.display()));
  }

  let default_path = work_dir.join(CATALOG_FILENAME);
  if default_path.is_file() {
    debug!(path = %default_path.display(), "using catalog from working directory");
    return Catalog::load(&default_path).with_context(|| format!("Failed to load catalog: {}", default_path.display()));
  }

  debug!("using built-in catalog");
  Ok(Catalog::builtin())
}
