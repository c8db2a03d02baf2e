//! Sprite command - writes the rasterized heart to a PNG

use super::load_settings;
use anyhow::{ensure, Context, Result};
use pinkboard_render::Sprite;

pub struct SpriteArgs {
    pub config: Option<String>,
    pub output: String,
    pub size: Option<u32>,
}

pub fn run(args: SpriteArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let size = args.size.unwrap_or(settings.particles.size);
    ensure!(size > 0, "Sprite size must be positive");

    let sprite =
        Sprite::heart(size, settings.particles.color).context("Failed to rasterize sprite")?;
    sprite
        .to_rgba_image()?
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    println!("Wrote {}x{} sprite to {}", size, size, args.output);
    Ok(())
}
