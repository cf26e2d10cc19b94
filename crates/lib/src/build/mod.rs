//! Cross-compiling components with the external toolchain.
//!
//! Each build is one toolchain subprocess for one (component, platform) pair.
//! Its configuration (target OS/arch, cgo, build flags) is carried by an
//! explicit [`BuildInvocation`] and applied to the child process only, so
//! consecutive builds cannot leak settings into each other.
//!
//! # Submodules
//!
//! - [`toolchain`] - Locating the toolchain binary and querying its version
//! - [`invocation`] - The argument/environment set for one toolchain run
//! - [`builder`] - Deterministic output paths and running builds

pub mod builder;
pub mod invocation;
pub mod toolchain;
mod types;

pub use builder::Builder;
pub use invocation::BuildInvocation;
pub use toolchain::Toolchain;
pub use types::*;
