//! Life Sim - HTTP entry point
//!
//! Loads the config, restores the snapshot file and serves the JSON API
//! plus the single-page UI.

use std::path::PathBuf;

use clap::Parser;
use life_sim::core::config::SimulationConfig;
use life_sim::server::{self, ServerError};
use life_sim::simulation::Simulation;
use tokio::runtime::Runtime;

/// Life Sim - single-player business simulation server
#[derive(Parser, Debug)]
#[command(name = "life-sim")]
#[command(about = "Serve the business life simulation over HTTP")]
struct Args {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides [server].bind)
    #[arg(long)]
    bind: Option<String>,

    /// Snapshot file to load and save (overrides [server].state_file)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Keep state in memory only
    #[arg(long)]
    no_save: bool,
}

fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("life_sim=info")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let addr = config.bind_addr()?;

    match &config.server.state_file {
        Some(path) => tracing::info!("Snapshot file: {}", path.display()),
        None => tracing::info!("Running without a snapshot file"),
    }

    let sim = Simulation::from_config(config);
    let rt = Runtime::new()?;
    rt.block_on(server::serve(addr, sim))
}

fn build_config(args: &Args) -> Result<SimulationConfig, ServerError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::new(),
    };

    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(path) = &args.state_file {
        config.server.state_file = Some(path.clone());
    }
    if args.no_save {
        config.server.state_file = None;
    }
    if args.seed.is_some() {
        config.rng.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}
