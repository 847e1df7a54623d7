//! CLI command definitions and dispatch.

pub mod convert;

use clap::{Parser, Subcommand};

/// taskform — run cloud task definitions locally.
#[derive(Parser, Debug)]
#[command(name = "tkf", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a task definition JSON file to a docker-compose descriptor.
    Convert(convert::ConvertArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Convert(args) => convert::execute(args),
    }
}
