mod cmd;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmd::{ReleaseArgs, cmd_release, cmd_verify};
use output::{OutputFormat, Status, status};

/// Cross-compile, package, and checksum a multi-platform release
#[derive(Parser)]
#[command(name = "relbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Toolchain binary (default: `go` on PATH)
  #[arg(long = "go", value_name = "PATH")]
  toolchain: Option<PathBuf>,

  /// Skip the build phase and archive existing outputs
  #[arg(long)]
  nobuild: bool,

  /// Skip the archive phase
  #[arg(long)]
  noarchive: bool,

  /// Release catalog (default: ./release.toml if present, else built-in)
  #[arg(short, long, value_name = "PATH")]
  catalog: Option<PathBuf>,

  /// Release working directory
  #[arg(short = 'C', long = "dir", value_name = "PATH", default_value = ".")]
  dir: PathBuf,

  /// Build output root, relative to the working directory
  #[arg(long, value_name = "PATH")]
  bin_dir: Option<PathBuf>,

  /// Archive directory, relative to the working directory
  #[arg(long, value_name = "PATH")]
  archive_dir: Option<PathBuf>,

  /// Verify an existing manifest and exit
  #[arg(long, value_name = "MANIFEST", conflicts_with_all = ["nobuild", "noarchive", "catalog"])]
  verify: Option<PathBuf>,

  /// Summary format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  let result = match cli.verify {
    Some(manifest) => cmd_verify(&manifest, cli.output),
    None => cmd_release(
      ReleaseArgs {
        toolchain: cli.toolchain,
        nobuild: cli.nobuild,
        noarchive: cli.noarchive,
        catalog: cli.catalog,
        dir: cli.dir,
        bin_dir: cli.bin_dir,
        archive_dir: cli.archive_dir,
      },
      cli.output,
    ),
  };

  if let Err(e) = result {
    status(Status::Failed, &format!("{e:#}"));
    std::process::exit(1);
  }
}
