//! Concept CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "concept")]
#[command(about = "Dependency analysis for conceptual schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Analysis config file (defaults to ./concept.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a schema and print its statistics and derivation forest
    Analyze {
        /// Schema JSON file
        schema: PathBuf,
    },
    /// Print the filtered display graph of a schema
    Graph {
        /// Schema JSON file
        schema: PathBuf,
    },
    /// Validate substitutions between schemas
    Validate {
        /// Participating schema JSON files
        #[arg(required = true)]
        schemas: Vec<PathBuf>,

        /// JSON list of {"original": id, "substitution": id}
        #[arg(short, long)]
        substitutions: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("concept={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Concept v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze { schema } => commands::analyze(&schema),
        Commands::Graph { schema } => {
            let config = config::AnalysisConfig::load(cli.config.as_deref())?;
            commands::graph(&schema, &config)
        }
        Commands::Validate {
            schemas,
            substitutions,
        } => {
            if commands::validate(&schemas, &substitutions)? {
                Ok(())
            } else {
                std::process::exit(1)
            }
        }
        Commands::Version => {
            println!("Concept v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
