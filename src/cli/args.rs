//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// hubcap - GitHub capabilities for agent reasoning loops
#[derive(Parser, Debug)]
#[command(name = "hubcap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every capability with a one-line summary
    #[command(name = "list")]
    List,

    /// Show the full input specification for one capability
    #[command(name = "spec")]
    Spec {
        /// Capability name (see `hubcap list`)
        name: String,
    },

    /// Invoke a capability and print its rendered result
    #[command(
        name = "invoke",
        long_about = "Invoke a capability and print its rendered result.\n\n\
            The input is taken from the second argument, or from stdin when \
            the argument is omitted. Results are always plain text; failures \
            are rendered into the text rather than reported as exit codes, \
            matching what a reasoning loop driving the registry sees.",
        after_help = "\
EXAMPLES:
    hubcap invoke repository_details rust-lang/cargo
    hubcap invoke read_file rust-lang/cargo/README.md
    echo '{\"query\": \"language:rust\", \"per_page\": 3}' | hubcap invoke search_repositories"
    )]
    Invoke {
        /// Capability name (see `hubcap list`)
        name: String,

        /// Raw input; read from stdin when omitted
        input: Option<String>,
    },

    /// Read capability invocations line by line from stdin
    #[command(
        name = "repl",
        long_about = "Read capability invocations line by line.\n\n\
            Each line is '<capability> <input...>'. 'help' lists capability \
            names, 'quit' or 'exit' ends the session."
    )]
    Repl,

    /// Generate shell completions
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
