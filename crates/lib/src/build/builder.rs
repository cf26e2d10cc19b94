//! Building one component for one platform.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::build::{BuildError, BuildInvocation, Toolchain};
use crate::catalog::{BuildSettings, Component};
use crate::platform::{Platform, exe_name};

/// Runs builds with a fixed toolchain and flag set.
///
/// `work_dir` is the release working directory that component build
/// directories are relative to; `bin_dir` is the output root. Both should be
/// absolute, since the toolchain resolves `-o` against the component's build
/// directory.
#[derive(Debug, Clone)]
pub struct Builder<'a> {
  toolchain: &'a Toolchain,
  settings: &'a BuildSettings,
  work_dir: &'a Path,
  bin_dir: &'a Path,
}

impl<'a> Builder<'a> {
  pub fn new(toolchain: &'a Toolchain, settings: &'a BuildSettings, work_dir: &'a Path, bin_dir: &'a Path) -> Self {
    Self {
      toolchain,
      settings,
      work_dir,
      bin_dir,
    }
  }

  /// `<bin_dir>/<os>-<arch>/<exe_name>`.
  pub fn output_path(&self, component: &Component, platform: &Platform) -> PathBuf {
    executable_path(self.bin_dir, component, platform)
  }

  pub fn invocation(&self, component: &Component, platform: &Platform) -> BuildInvocation {
    let cwd = self.work_dir.join(&component.build_dir);
    let output = self.output_path(component, platform);
    BuildInvocation::build(self.toolchain, self.settings, component, platform, &cwd, &output)
  }

  /// Build `component` for `platform` and return the executable path.
  pub fn build(&self, component: &Component, platform: &Platform) -> Result<PathBuf, BuildError> {
    let invocation = self.invocation(component, platform);
    let output = self.output_path(component, platform);
    let shown = output.strip_prefix(self.work_dir).unwrap_or(&output);
    info!(path = %shown.display(), "build");

    let captured = invocation.run()?;
    if !captured.output.is_empty() {
      info!(
        "{} {}\n{}",
        self.toolchain.path().display(),
        invocation.display_args(),
        captured.output.trim_end()
      );
    }

    if !captured.status.success() {
      return Err(BuildError::Failed {
        module: component.module.clone(),
        platform: *platform,
        code: captured.status.code(),
        output: captured.output,
      });
    }

    Ok(output)
  }
}

/// Where the executable for (`component`, `platform`) lives under `bin_dir`.
///
/// Depends only on its arguments, so archiving can locate outputs from an
/// earlier run.
pub fn executable_path(bin_dir: &Path, component: &Component, platform: &Platform) -> PathBuf {
  bin_dir
    .join(platform.dir_name())
    .join(exe_name(&component.module, platform.os))
}
