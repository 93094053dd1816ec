use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use neural_snake::app::{self, App, StartMode};
use neural_snake::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neural-snake")]
#[command(version, about = "Snake game with a neural network player and visualizer")]
struct Cli {
    /// Screen to open on
    #[arg(long, value_enum, default_value_t = StartMode::Menu)]
    mode: StartMode,

    /// JSON settings file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Saved network parameters (.json or bincode) for playback
    #[arg(long)]
    model: Option<PathBuf>,

    /// Seed for food placement, headings and fresh weights
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if cli.mode != StartMode::Visualize && !config.playback_architecture_ok() {
        bail!(
            "architecture {:?} must start with the observation width and end with 4 outputs",
            config.architecture
        );
    }

    info!(mode = ?cli.mode, model = ?cli.model, seed = ?cli.seed, "starting");
    let app = App::new(config, cli.model, cli.seed, cli.mode)?;
    app::run(app)
}
