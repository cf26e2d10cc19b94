//! End-to-end tests running `relbuild` against a fake toolchain.
#![cfg(unix)]

mod common;
mod release_tests;
mod verify_tests;
