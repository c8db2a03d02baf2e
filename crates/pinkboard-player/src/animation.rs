//! Assembles the animation from settings

use pinkboard_core::Result;
use pinkboard_particles::falling_text::FallingTextSystem;
use pinkboard_particles::heart_system::HeartSystem;
use pinkboard_particles::settings::Settings;
use pinkboard_render::{Canvas, Sprite, TextRasterizer};
use pinkboard_runtime::{AnimationDriver, Clock};

/// Build a driver running the heart particles and, when enabled, the falling
/// words on top. With `seed` every random draw is reproducible.
pub fn build_driver<C: Clock>(
    settings: &Settings,
    clock: C,
    seed: Option<u64>,
) -> Result<AnimationDriver<Canvas, C>> {
    settings.validate()?;

    let particles = settings.particles.clone();
    let sprite = Sprite::heart(particles.size, particles.color)?;
    let hearts = match seed {
        Some(seed) => HeartSystem::with_seed(particles, sprite, seed),
        None => HeartSystem::new(particles, sprite),
    };

    let mut driver = AnimationDriver::with_clock(clock);
    driver.add_system(Box::new(hearts));

    if settings.falling_text.enabled {
        let words = settings.falling_text.clone();
        let text = match seed {
            Some(seed) => FallingTextSystem::with_seed(words, seed.wrapping_add(1)),
            None => FallingTextSystem::new(words),
        };
        driver.add_system(Box::new(text));
    }

    Ok(driver)
}

/// Allocate the canvas the driver draws into. A configured font that cannot
/// be loaded is an error; a machine without system fonts only loses the words.
pub fn build_canvas(settings: &Settings, width: u32, height: u32) -> Result<Canvas> {
    let canvas = Canvas::new(width, height)?;
    if !settings.falling_text.enabled {
        return Ok(canvas);
    }
    match settings.falling_text.font.as_deref() {
        Some(path) => Ok(canvas.with_text(TextRasterizer::load(path)?)),
        None => match TextRasterizer::system_sans_serif() {
            Ok(font) => Ok(canvas.with_text(font)),
            Err(e) => {
                log::warn!("Falling text disabled: {}", e);
                Ok(canvas)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkboard_core::DrawingSurface;
    use pinkboard_runtime::ManualClock;

    #[test]
    fn registers_hearts_then_text() {
        let driver = build_driver(&Settings::default(), ManualClock::new(), Some(1)).unwrap();
        assert_eq!(driver.system_names(), vec!["hearts", "falling_text"]);
    }

    #[test]
    fn falling_text_can_be_disabled() {
        let mut settings = Settings::default();
        settings.falling_text.enabled = false;
        let driver = build_driver(&settings, ManualClock::new(), None).unwrap();
        assert_eq!(driver.system_names(), vec!["hearts"]);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = Settings::default();
        settings.particles.duration = 0.0;
        assert!(build_driver(&settings, ManualClock::new(), Some(1)).is_err());
    }

    #[test]
    fn canvas_skips_fonts_when_text_is_off() {
        let mut settings = Settings::default();
        settings.falling_text.enabled = false;
        settings.falling_text.font = Some("/nonexistent/font.ttf".into());
        let canvas = build_canvas(&settings, 10, 10).unwrap();
        assert!(!canvas.has_text());
    }

    #[test]
    fn configured_font_must_load() {
        let mut settings = Settings::default();
        settings.falling_text.font = Some("/nonexistent/font.ttf".into());
        assert!(build_canvas(&settings, 10, 10).is_err());
    }

    #[test]
    fn frames_draw_hearts_onto_the_canvas() {
        let clock = ManualClock::new();
        let mut driver = build_driver(&Settings::default(), clock.clone(), Some(3)).unwrap();
        let mut canvas = Canvas::new(1, 1).unwrap();
        driver.set_displayed_size(400, 400);
        driver.start_immediately();

        // The first frame only measures time
        driver.frame(&mut canvas).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (400, 400));
        assert!(canvas.data().iter().all(|&b| b == 0));

        clock.advance(0.1);
        driver.frame(&mut canvas).unwrap();
        assert!(canvas.data().chunks_exact(4).any(|px| px[3] > 0));
        assert!(driver.is_running());
    }
}
