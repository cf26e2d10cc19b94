//! Toolchain invocation for a single build.
//!
//! Target selection goes through environment variables that the toolchain
//! reads (`GOOS`, `GOARCH`, `CGO_ENABLED`, `GOFLAGS`). They are set on the
//! child `Command` only. `GOFLAGS` is always set, to the empty string, so
//! flags inherited from the caller's environment never reach a build.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::build::{BuildError, Toolchain};
use crate::catalog::{BuildSettings, Component};
use crate::platform::Platform;

/// Everything needed to run the toolchain once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
  pub program: PathBuf,
  pub args: Vec<OsString>,
  pub env: BTreeMap<String, String>,
  pub cwd: PathBuf,
}

/// Exit status plus stdout and stderr interleaved in one stream.
#[derive(Debug)]
pub struct CapturedOutput {
  pub status: ExitStatus,
  pub output: String,
}

impl BuildInvocation {
  /// `build [-trimpath] -tags <tags> -o <output> -ldflags <ldflags> <module>`
  /// run from `cwd` with the target environment for `platform`.
  pub fn build(
    toolchain: &Toolchain,
    settings: &BuildSettings,
    component: &Component,
    platform: &Platform,
    cwd: &Path,
    output: &Path,
  ) -> Self {
    let mut args: Vec<OsString> = vec!["build".into()];
    if settings.trimpath {
      args.push("-trimpath".into());
    }
    if !settings.tags.is_empty() {
      args.push("-tags".into());
      args.push(settings.tags_arg().into());
    }
    args.push("-o".into());
    args.push(output.as_os_str().to_owned());
    args.push("-ldflags".into());
    args.push(settings.ldflags().into());
    args.push(component.module.clone().into());

    Self {
      program: toolchain.path().to_path_buf(),
      args,
      env: target_env(platform),
      cwd: cwd.to_path_buf(),
    }
  }

  /// The configured child process. Stdio is left to the caller.
  pub fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args).envs(&self.env).current_dir(&self.cwd);
    command
  }

  /// Arguments quoted for log output: `'build' '-trimpath' ...`.
  pub fn display_args(&self) -> String {
    let joined = self
      .args
      .iter()
      .map(|a| a.to_string_lossy())
      .collect::<Vec<_>>()
      .join("' '");
    format!("'{joined}'")
  }

  /// Run to completion, capturing stdout and stderr into a single stream.
  ///
  /// Both streams of the child are attached to the same temporary file, so
  /// the captured text interleaves exactly as the toolchain wrote it.
  pub fn run(&self) -> Result<CapturedOutput, BuildError> {
    let mut log: File = tempfile::tempfile()?;

    debug!(program = %self.program.display(), cwd = %self.cwd.display(), args = %self.display_args(), "spawning toolchain");

    let status = self
      .command()
      .stdin(Stdio::null())
      .stdout(log.try_clone()?)
      .stderr(log.try_clone()?)
      .status()
      .map_err(|source| BuildError::Spawn {
        program: self.program.display().to_string(),
        source,
      })?;

    log.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    log.read_to_end(&mut bytes)?;

    Ok(CapturedOutput {
      status,
      output: String::from_utf8_lossy(&bytes).into_owned(),
    })
  }
}

/// Target environment for a pure cross-compile: no host C interop and no
/// inherited build-mode flags.
pub fn target_env(platform: &Platform) -> BTreeMap<String, String> {
  BTreeMap::from([
    ("GOOS".to_string(), platform.os.as_str().to_string()),
    ("GOARCH".to_string(), platform.arch.as_str().to_string()),
    ("CGO_ENABLED".to_string(), "0".to_string()),
    ("GOFLAGS".to_string(), String::new()),
  ])
}
