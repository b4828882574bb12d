//! Rapport CLI - Resolve and exercise social-graph relationships.

use clap::Parser;
use rapport_cli::commands;
use rapport_cli::{Cli, Command, Config, Formatter};
use rapport_gatekeeper::Gatekeeper;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> rapport_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, falling back to defaults for a missing file
    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    // Initialize tracing (log to stderr, RUST_LOG wins over the config)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.settings.log_level)),
        )
        .init();

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Boundary validation rules
    let preset = cli.validation.map(|p| p.as_str());
    let gatekeeper = Gatekeeper::new(config.validation_config(preset)?);
    tracing::debug!(rules = ?gatekeeper.config(), "Validation rules loaded");

    // Handle commands
    match cli.command {
        Command::Resolve(args) => {
            commands::execute_resolve(args, &gatekeeper, &formatter).await?;
        }
        Command::Actions => {
            commands::execute_actions(&formatter).await?;
        }
        Command::Simulate(args) => {
            commands::execute_simulate(args, &gatekeeper, &formatter).await?;
        }
    }

    Ok(())
}
