mod release;
mod verify;

pub use release::{ReleaseArgs, cmd_release};
pub use verify::cmd_verify;
