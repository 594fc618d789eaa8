//! cli::commands
//!
//! Command handlers. Each handler builds what it needs from the resolved
//! configuration and prints through [`crate::ui::output`].

use std::io::Read;

use anyhow::{bail, Context as _, Result};
use clap::CommandFactory;

use crate::capability::Registry;
use crate::cli::args::{Cli, Command};
use crate::config::Config;
use crate::ui::output::{self, Verbosity};

/// Dispatch a parsed command.
pub fn dispatch(command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::List => list(verbosity),
        Command::Spec { name } => spec(&name),
        Command::Invoke { name, input } => invoke(&name, input, verbosity),
        Command::Repl => repl(verbosity),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "hubcap", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load configuration and warn once when no token is available.
fn load_config(verbosity: Verbosity) -> Result<Config> {
    let config = Config::load().context("loading configuration")?;
    if config.token.is_none() {
        output::warn(
            "no GitHub token configured; only public reads will succeed \
             (set HUBCAP_GITHUB_TOKEN or GITHUB_TOKEN)",
            verbosity,
        );
    }
    Ok(config)
}

/// `hubcap list`
fn list(verbosity: Verbosity) -> Result<()> {
    let registry = Registry::new(&load_config(Verbosity::Quiet)?);
    for capability in registry.iter() {
        output::print(
            format!("{:<24} {}", capability.name(), capability.summary()),
            verbosity,
        );
    }
    Ok(())
}

/// `hubcap spec <name>`
fn spec(name: &str) -> Result<()> {
    let registry = Registry::new(&load_config(Verbosity::Quiet)?);
    let Some(capability) = registry.get(name) else {
        bail!(
            "unknown capability '{}'. Run `hubcap list` for the available set.",
            name
        );
    };
    println!("{}\n", capability.name());
    println!("{}", capability.input_spec().trim_end());
    Ok(())
}

/// `hubcap invoke <name> [input]`
fn invoke(name: &str, input: Option<String>, verbosity: Verbosity) -> Result<()> {
    let config = load_config(verbosity)?;
    let registry = Registry::new(&config);
    let Some(capability) = registry.get(name) else {
        bail!(
            "unknown capability '{}'. Run `hubcap list` for the available set.",
            name
        );
    };

    let input = match input {
        Some(input) => input,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading input from stdin")?;
            buffer
        }
    };
    let input = input.trim();

    output::debug(format!("invoking {} with {:?}", name, input), verbosity);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    output::result(runtime.block_on(capability.invoke(input)));
    Ok(())
}

/// `hubcap repl`
fn repl(verbosity: Verbosity) -> Result<()> {
    let config = load_config(verbosity)?;
    let registry = Registry::new(&config);
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    output::print(
        "hubcap repl - '<capability> <input...>' per line, 'help' for names, 'quit' to exit",
        verbosity,
    );

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "help" {
            for capability in registry.iter() {
                println!("{:<24} {}", capability.name(), capability.summary());
            }
            continue;
        }

        let (name, input) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        match registry.get(name) {
            Some(capability) => {
                output::result(runtime.block_on(capability.invoke(input)));
            }
            None => output::error(format!(
                "unknown capability '{}'; 'help' lists the available set",
                name
            )),
        }
    }
    Ok(())
}
