//! Remodel CLI. Checks model changes against the generation manifest,
//! records snapshots, and prints model checksums.

mod commands;
mod formatter;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formatter::{create_formatter, OutputFormat};

#[derive(Parser)]
#[command(name = "remodel")]
#[command(about = "Schema migration checks for generated model catalogs")]
#[command(version)]
struct Args {
    /// Output format.
    #[arg(long, global = true, default_value = "table", value_enum)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Diff the current models against the manifest and report migration risk.
    Check {
        /// Path to the model definitions (JSON array).
        #[arg(long)]
        models: PathBuf,

        /// Path to the generation manifest.
        #[arg(long)]
        manifest: PathBuf,

        /// Identifier of the owning microservice.
        #[arg(long)]
        service_id: String,

        /// Confirmation for a dangerous change, as FIELD_ID=LITERAL. Repeatable.
        #[arg(long = "confirm")]
        confirmations: Vec<String>,
    },

    /// Capture the current models into the manifest file.
    Snapshot {
        /// Path to the model definitions (JSON array).
        #[arg(long)]
        models: PathBuf,

        /// Path to the generation manifest.
        #[arg(long)]
        manifest: PathBuf,

        /// Identifier of the owning microservice.
        #[arg(long)]
        service_id: String,
    },

    /// Print the checksum of every model.
    Checksum {
        /// Path to the model definitions (JSON array).
        #[arg(long)]
        models: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("remodel=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let formatter = create_formatter(args.format);

    match args.command {
        Command::Check {
            models,
            manifest,
            service_id,
            confirmations,
        } => {
            let result = commands::check(
                &models,
                &manifest,
                &service_id,
                &confirmations,
                &*formatter,
            )?;
            println!("{}", result.output);
            if !result.proceed {
                process::exit(1);
            }
        }
        Command::Snapshot {
            models,
            manifest,
            service_id,
        } => {
            let output = commands::snapshot(&models, &manifest, &service_id, &*formatter)?;
            println!("{}", output);
        }
        Command::Checksum { models } => {
            let output = commands::checksum(&models, &*formatter)?;
            println!("{}", output);
        }
    }

    Ok(())
}
