//! Pinkboard CLI - a heart drawn by particles

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{play, render, settings, sprite};

#[derive(Parser)]
#[command(name = "pinkboard")]
#[command(about = "A heart drawn by particles, in a window or as PNG frames", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and play the animation
    Play {
        /// Settings file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Window width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Window height in pixels
        #[arg(long, default_value = "720")]
        height: u32,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,

        /// Hide the falling words
        #[arg(long)]
        no_falling_text: bool,

        /// Fixed random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render the animation offscreen to numbered PNG frames
    Render {
        /// Settings file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        output: String,

        /// Number of frames to write
        #[arg(long, default_value = "120")]
        frames: u32,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Image width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Hide the falling words
        #[arg(long)]
        no_falling_text: bool,
    },

    /// Write the heart sprite to a PNG
    Sprite {
        /// Settings file (TOML) for sprite size and colour
        #[arg(long)]
        config: Option<String>,

        /// Output image path
        #[arg(short, long, default_value = "heart.png")]
        output: String,

        /// Override the sprite size in pixels
        #[arg(long)]
        size: Option<u32>,
    },

    /// Print the effective settings as TOML
    Settings {
        /// Settings file (TOML)
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            width,
            height,
            fullscreen,
            no_falling_text,
            seed,
        } => play::run(play::PlayArgs {
            config,
            width,
            height,
            fullscreen,
            no_falling_text,
            seed,
        }),
        Commands::Render {
            config,
            output,
            frames,
            fps,
            width,
            height,
            seed,
            no_falling_text,
        } => render::run(render::RenderArgs {
            config,
            output,
            frames,
            fps,
            width,
            height,
            seed,
            no_falling_text,
        }),
        Commands::Sprite {
            config,
            output,
            size,
        } => sprite::run(sprite::SpriteArgs {
            config,
            output,
            size,
        }),
        Commands::Settings { config } => settings::run(config),
    }
}
