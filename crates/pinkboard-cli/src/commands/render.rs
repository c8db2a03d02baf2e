//! Offscreen render command - writes the animation as numbered PNG frames

use super::load_settings;
use anyhow::{ensure, Context, Result};
use log::{info, warn};
use pinkboard_player::{build_canvas, build_driver};
use pinkboard_runtime::ManualClock;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct RenderArgs {
    pub config: Option<String>,
    pub output: String,
    pub frames: u32,
    pub fps: f32,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub no_falling_text: bool,
}

pub fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{:05}.png", index))
}

pub fn run(args: RenderArgs) -> Result<()> {
    ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "Frame rate must be positive, got {}",
        args.fps
    );

    let mut settings = load_settings(args.config.as_deref())?;
    if args.no_falling_text {
        settings.falling_text.enabled = false;
    }

    let output = Path::new(&args.output);
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let clock = ManualClock::new();
    let mut driver = build_driver(&settings, clock.clone(), Some(args.seed))
        .context("Failed to build animation")?;
    let mut canvas = build_canvas(&settings, args.width, args.height)
        .context("Failed to allocate canvas")?;
    driver.set_displayed_size(args.width, args.height);
    driver.start_immediately();

    let step = 1.0 / args.fps as f64;
    let started = Instant::now();
    for index in 0..args.frames {
        if !driver.on_display_refresh(&mut canvas, Instant::now())? {
            warn!("Animation stopped after {} frame(s)", index);
            break;
        }
        let path = frame_path(output, index);
        canvas
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        clock.advance(step);
    }
    driver.shutdown()?;

    info!(
        "Rendered {} frame(s) at {}x{} to {} in {:.2?}",
        driver.frame_count(),
        args.width,
        args.height,
        output.display(),
        started.elapsed()
    );
    Ok(())
}
