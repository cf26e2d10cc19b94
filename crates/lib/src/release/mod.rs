//! Release orchestration.
//!
//! [`run_release`] drives the whole pipeline for a catalog:
//!
//! 1. For each platform, in catalog order:
//!    - build every component (unless the build phase is skipped)
//!    - archive the platform's executables and record a manifest entry
//!      (unless the archive phase is skipped)
//! 2. Write the manifest once, if any archive was produced
//!
//! Everything runs sequentially. The first error aborts the run and is
//! returned; archives and executables already produced stay on disk.

mod run;
mod types;

pub use run::run_release;
pub use types::*;
