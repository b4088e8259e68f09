//! Lumen Control - terminal chat client for the Lumen reply engine.
//!
//! Stands in for the graphical chat UI: owns the conversation history,
//! assigns message ids and timestamps, and renders the engine's replies.

mod repl;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lumen_common::EngineConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumenctl")]
#[command(about = "Lumen - deterministic chat companion", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the random source for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Override the simulated thinking delay (milliseconds)
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::default(),
    };
    if let Some(ms) = cli.latency_ms {
        config.latency_ms = ms;
    }

    repl::run(config, cli.seed, cli.plain).await
}
