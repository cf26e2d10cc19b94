//! Names and defaults shared across the crate.

pub const APP_NAME: &str = "relbuild";

/// Catalog file picked up from the working directory when none is given.
pub const CATALOG_FILENAME: &str = "release.toml";

/// Default root for built executables, relative to the working directory.
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Default directory for archives and the manifest, relative to the working directory.
pub const DEFAULT_ARCHIVE_DIR: &str = "archive";

/// Toolchain binary looked up on `PATH` when no explicit path is given.
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Unix mode for executables and directories inside archives.
pub const ARCHIVE_ENTRY_MODE: u32 = 0o755;
