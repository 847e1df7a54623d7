//! # tkf — taskform CLI
//!
//! Translates cloud task definitions into docker-compose descriptors for
//! running the same containers on a developer machine.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
