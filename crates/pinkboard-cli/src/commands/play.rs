//! Play command - opens the animation in a window

use super::load_settings;
use anyhow::Result;
use pinkboard_player::PlayerOptions;

pub struct PlayArgs {
    pub config: Option<String>,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub no_falling_text: bool,
    pub seed: Option<u64>,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref())?;
    if args.no_falling_text {
        settings.falling_text.enabled = false;
    }

    println!("Controls:");
    println!("  Escape   - Exit");

    pinkboard_player::run(
        settings,
        PlayerOptions {
            width: args.width,
            height: args.height,
            fullscreen: args.fullscreen,
            seed: args.seed,
        },
    )
}
