//! wfgen CLI
//!
//! Runs the generator over compilation snapshots, standing in for the host
//! compiler during development and in CI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// wfgen - typed wrapper generation for Temporal workflows and activities
#[derive(Parser)]
#[command(name = "wfgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file or project directory
    #[arg(short, long, default_value = "wfgen.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new wfgen project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Generate sources for every snapshot
    Generate {
        /// Snapshot files or directories to use instead of the configured inputs
        #[arg(short, long)]
        input: Vec<String>,
    },

    /// Fail if generated sources on disk are stale
    Check,

    /// Print the extracted model of one snapshot as JSON
    Inspect {
        /// Snapshot file
        snapshot: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref()).await?;
        }
        Commands::Generate { input } => {
            commands::generate::run(&cli.config, &input).await?;
        }
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
        Commands::Inspect { snapshot } => {
            commands::inspect::run(&snapshot).await?;
        }
    }

    Ok(())
}
