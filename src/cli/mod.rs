//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT talk to the API directly; handlers go through the registry
//!
//! The CLI is one caller of the capability surface; a reasoning loop
//! embedding the library is another. Both see the same registry.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use anyhow::Result;

use crate::ui::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    commands::dispatch(cli.command, verbosity)
}
