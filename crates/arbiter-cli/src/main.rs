// crates/arbiter-cli/src/main.rs
//
// CLI entrypoint for the Arbiter artifact trust engine.
//
// Provides subcommands for scoring an artifact from its metadata, printing
// the lineage of a registered model, and checking license compatibility.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::license::LicenseCheckCmd;
use commands::lineage::LineageCmd;
use commands::score::ScoreCmd;
use commands::Settings;
use config::ArbiterConfig;

/// Arbiter CLI: trust scoring for ML models, datasets and code.
#[derive(Parser, Debug)]
#[command(
    name = "arbiter",
    version = "0.1.0",
    about = "Arbiter: quality and trust scoring for machine learning artifacts"
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "~/.arbiter/config.toml")]
    config: String,

    /// Registry snapshot (JSON) used for lineage lookups.
    #[arg(long, global = true)]
    registry: Option<String>,

    /// Output format: table or json.
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Score an artifact from a metadata JSON file.
    Score(ScoreCmd),

    /// Print the lineage graph of a registered model.
    Lineage(LineageCmd),

    /// Check whether a repository license is compatible with an artifact license.
    LicenseCheck(LicenseCheckCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, load_error) = match ArbiterConfig::load(&cli.config) {
        Ok(c) => (c, None),
        Err(e) => (ArbiterConfig::default(), Some(e.to_string())),
    };

    init_tracing(&config.log_level);
    if let Some(e) = load_error {
        tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        );
    }

    // CLI flags override config values.
    if let Some(registry) = &cli.registry {
        config.registry_path = Some(registry.clone());
    }
    if let Some(format) = &cli.format {
        config.output = format.clone();
    }

    let settings = Settings::from_config(&config)?;

    match &cli.command {
        Commands::Score(cmd) => commands::score::run(cmd, &settings).await?,
        Commands::Lineage(cmd) => commands::lineage::run(cmd, &settings).await?,
        Commands::LicenseCheck(cmd) => commands::license::run(cmd, settings.format).await?,
    }

    Ok(())
}

/// Initialize tracing; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
