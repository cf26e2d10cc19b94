//! relbuild-lib: Core types and logic for relbuild
//!
//! This crate provides everything needed to cut a multi-platform release:
//! - `Catalog`: the product, version, platforms, and components to release
//! - `Builder`: cross-compiles one component for one platform
//! - `Archiver`: packages a platform's executables into a tar.gz or zip
//! - `Manifest`: the SHA-256 checksum list covering every archive
//! - `run_release`: the per-platform build/archive loop tying them together

pub mod archive;
pub mod build;
pub mod catalog;
pub mod consts;
pub mod manifest;
pub mod platform;
pub mod release;
pub mod util;

pub use catalog::Catalog;
pub use platform::{Arch, Os, Platform};
pub use release::{ReleaseError, ReleaseOptions, ReleaseReport, run_release};
