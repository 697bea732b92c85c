//! fcat-cli library - terminal front end for the filament catalog
//!
//! Argument parsing and rendering live here so they can be exercised
//! without spawning the binary.

pub mod cli;
pub mod format;

pub use cli::{execute, Cli, Command};
pub use format::CliFormatter;
