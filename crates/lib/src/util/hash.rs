//! Hashing utilities for archive checksums.
//!
//! This module provides:
//! - `Sha256Sum`: a fixed-width 32-byte digest rendered as 64 lowercase hex chars
//! - `HashingWriter`: a writer that forwards bytes to a sink while hashing them
//! - `hash_file()`: streaming single file hashing

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// A SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Sum(pub [u8; 32]);

impl Sha256Sum {
  /// Lowercase hexadecimal form (64 characters).
  pub fn to_hex(&self) -> String {
    hex::encode(self.0)
  }
}

impl fmt::Display for Sha256Sum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_hex())
  }
}

impl FromStr for Sha256Sum {
  type Err = hex::FromHexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(Self(bytes))
  }
}

impl Serialize for Sha256Sum {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

/// A writer that forwards every byte to `inner` and feeds the same bytes to a
/// SHA-256 accumulator.
///
/// Only bytes the inner writer accepted are hashed, so after a successful
/// [`finish`](Self::finish) the digest covers exactly what reached the sink.
pub struct HashingWriter<W> {
  inner: W,
  hasher: Sha256,
  written: u64,
}

impl<W: Write> HashingWriter<W> {
  pub fn new(inner: W) -> Self {
    Self {
      inner,
      hasher: Sha256::new(),
      written: 0,
    }
  }

  /// Number of bytes forwarded so far.
  pub fn bytes_written(&self) -> u64 {
    self.written
  }

  /// Flush the inner writer and return it along with the digest.
  pub fn finish(mut self) -> io::Result<(W, Sha256Sum)> {
    self.inner.flush()?;
    let digest = Sha256Sum(self.hasher.finalize().into());
    Ok((self.inner, digest))
  }
}

impl<W: Write> Write for HashingWriter<W> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let n = self.inner.write(buf)?;
    self.hasher.update(&buf[..n]);
    self.written += n as u64;
    Ok(n)
  }

  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}

/// Hash a file's contents without holding it in memory.
pub fn hash_file(path: &Path) -> io::Result<Sha256Sum> {
  let mut file = File::open(path)?;
  let mut writer = HashingWriter::new(io::sink());
  io::copy(&mut file, &mut writer)?;
  let (_, digest) = writer.finish()?;
  Ok(digest)
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> Sha256Sum {
  Sha256Sum(Sha256::digest(data).into())
}
