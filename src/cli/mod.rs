//! Command-line interface module.

mod args;
pub mod build;
pub mod common;
pub mod manifest;

pub use args::{BuildArgs, Cli, Commands, ManifestArgs};
