//! The per-platform build/archive loop.

use tracing::{debug, info};

use crate::archive::Archiver;
use crate::build::Builder;
use crate::catalog::Catalog;
use crate::manifest::Manifest;

use super::types::{ReleaseError, ReleaseOptions, ReleaseReport};

/// Build, archive, and checksum every platform in `catalog`.
///
/// Relative directories in `options` are resolved against the current
/// directory first. Stops at the first failure: no later platform is touched
/// and no manifest is written. Outputs of earlier platforms are left in place.
pub fn run_release(catalog: &Catalog, options: &ReleaseOptions) -> Result<ReleaseReport, ReleaseError> {
  catalog.validate()?;
  let options = options.resolved()?;

  let mut report = ReleaseReport::default();

  if !options.skip_build {
    let version = options.toolchain.version()?;
    info!("releasing with {} {}", options.toolchain.path().display(), version);
    report.toolchain_version = Some(version);
  }

  let builder = Builder::new(
    &options.toolchain,
    &catalog.build,
    &options.work_dir,
    &options.bin_dir,
  );
  let archiver = Archiver::new(catalog, &options.bin_dir, &options.archive_dir);
  let mut manifest = Manifest::new();

  for platform in &catalog.platforms {
    debug!(platform = %platform, "processing platform");

    if !options.skip_build {
      for component in &catalog.components {
        let path = builder.build(component, platform)?;
        report.built.push(path);
      }
    }

    if options.skip_archive {
      continue;
    }

    let output = archiver.archive(platform)?;
    manifest.push(output.entry.clone());
    report.archives.push(output);
  }

  report.manifest = manifest.write(&options.archive_dir, &catalog.manifest_file_name())?;

  Ok(report)
}
