//! Pinkboard Player - standalone windowed heart animation
//!
//! Usage:
//!   pinkboard-player [--config <settings.toml>] [--fullscreen]

use anyhow::{Context, Result};
use clap::Parser;
use pinkboard_particles::settings::Settings;
use pinkboard_player::PlayerOptions;

#[derive(Parser)]
#[command(name = "pinkboard-player")]
#[command(about = "Pinkboard player - a heart drawn by particles")]
struct Args {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => {
            Settings::load(path).with_context(|| format!("Failed to load settings from {path}"))?
        }
        None => Settings::default(),
    };

    let options = PlayerOptions {
        fullscreen: args.fullscreen,
        ..PlayerOptions::default()
    };
    pinkboard_player::run(settings, options)
}
