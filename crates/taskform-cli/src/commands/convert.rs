//! `tkf convert` — Translate a task definition into a compose descriptor.

use std::path::PathBuf;

use clap::Args;

use taskform_common::constants::DEFAULT_TASK_FILE;
use taskform_compose::convert::convert_task_definition;
use taskform_task::definition::TaskDefinition;

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the task definition JSON file.
    #[arg(default_value = DEFAULT_TASK_FILE)]
    pub file: PathBuf,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the `convert` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, converted, or written.
pub fn execute(args: ConvertArgs) -> anyhow::Result<()> {
    let input = &args.file;
    tracing::info!(path = %input.display(), "converting task definition");

    if !input.exists() {
        anyhow::bail!("file not found: {}", input.display());
    }

    let task = TaskDefinition::from_file(input)?;
    let compose = convert_task_definition(&task)?;
    let yaml = compose.to_yaml()?;

    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &yaml)?;
        println!("Converted {} -> {}", input.display(), out_path.display());
        println!("Services: {}", compose.services.len());
    } else {
        print!("{yaml}");
    }

    Ok(())
}
