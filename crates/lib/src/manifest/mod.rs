//! Checksum manifest for a release.
//!
//! The manifest lists one `<sha256-hex>  <archive file name>` line per
//! archive, in the order the archives were written. It is the same format
//! `sha256sum` emits, so `sha256sum -c manifest-<version>.txt` works from the
//! archive directory.

mod types;
mod verify;

pub use types::*;
pub use verify::{EntryStatus, VerifyReport, verify_manifest};
