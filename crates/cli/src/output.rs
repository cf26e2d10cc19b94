//! Terminal output for release summaries and verification results.
//!
//! Results and summaries go to stdout, problems to stderr. Color is applied
//! only when the target stream supports it.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use relbuild_lib::util::hash::Sha256Sum;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// A finished release or a verified archive.
  Done,
  /// One produced artifact.
  Item,
  /// A mismatched or missing archive.
  Warn,
  /// The run failed.
  Failed,
}

impl Status {
  fn marker(self) -> &'static str {
    match self {
      Status::Done => "✓",
      Status::Item => "•",
      Status::Warn => "⚠",
      Status::Failed => "✗",
    }
  }
}

pub fn status(kind: Status, message: &str) {
  let marker = kind.marker();
  match kind {
    Status::Done => println!("{} {}", marker.if_supports_color(Stream::Stdout, |s| s.green()), message),
    Status::Item => println!("{} {}", marker.if_supports_color(Stream::Stdout, |s| s.blue()), message),
    Status::Warn => eprintln!(
      "{} {}",
      marker.if_supports_color(Stream::Stderr, |s| s.yellow()),
      message.if_supports_color(Stream::Stderr, |s| s.yellow())
    ),
    Status::Failed => eprintln!(
      "{} {}",
      marker.if_supports_color(Stream::Stderr, |s| s.red()),
      message.if_supports_color(Stream::Stderr, |s| s.red())
    ),
  }
}

/// An indented `label: value` summary line.
pub fn field(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let text = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{text}");
  Ok(())
}

/// Leading 12 hex characters of a digest, enough to tell archives apart.
pub fn short_digest(digest: &Sha256Sum) -> String {
  let mut hex = digest.to_hex();
  hex.truncate(12);
  hex
}

/// Archive size in binary units.
pub fn archive_size(bytes: u64) -> String {
  const KIB: f64 = 1024.0;
  const MIB: f64 = KIB * 1024.0;

  let b = bytes as f64;
  if b >= MIB {
    format!("{:.1} MiB", b / MIB)
  } else if b >= KIB {
    format!("{:.1} KiB", b / KIB)
  } else {
    format!("{bytes} B")
  }
}

/// Wall time of a run: seconds with two decimals, minutes past the first minute.
pub fn elapsed(duration: Duration) -> String {
  let secs = duration.as_secs();
  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else {
    format!("{:.2}s", duration.as_secs_f64())
  }
}
