//! Words that drift down the screen on a repeating timer

use crate::curves::lerp_f32;
use crate::settings::FallingTextSettings;
use log::info;
use pinkboard_core::{DrawingSurface, Result};
use pinkboard_runtime::{FrameInfo, RuntimeSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Timer bursts handled in a single frame before the backlog is dropped
const MAX_BURSTS_PER_FRAME: u32 = 4;

/// One word on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingWord {
    pub text: String,
    /// Left edge in surface pixels
    pub x: f32,
    /// Seconds from top to bottom
    pub lifetime: f32,
    pub age: f32,
}

impl FallingWord {
    pub fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            1.0
        } else {
            (self.age / self.lifetime).min(1.0)
        }
    }

    /// Top edge: starts just above the surface and ends at its bottom
    pub fn y(&self, surface_height: f32, font_size: f32) -> f32 {
        lerp_f32(-font_size, surface_height, self.progress())
    }

    pub fn finished(&self) -> bool {
        self.age >= self.lifetime
    }
}

pub struct FallingTextSystem {
    settings: FallingTextSettings,
    words: Vec<FallingWord>,
    accumulator: f32,
    rng: StdRng,
}

impl FallingTextSystem {
    pub fn new(settings: FallingTextSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    pub fn with_seed(settings: FallingTextSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: FallingTextSettings, rng: StdRng) -> Self {
        Self {
            settings,
            words: Vec::new(),
            accumulator: 0.0,
            rng,
        }
    }

    pub fn words(&self) -> &[FallingWord] {
        &self.words
    }

    fn spawn(&mut self, surface_width: u32) {
        if self.settings.words.is_empty() {
            return;
        }
        let index = self.rng.random_range(0..self.settings.words.len());
        let x = self.rng.random::<f32>() * surface_width as f32;
        let lifetime = self.settings.lifetime(self.rng.random());
        self.words.push(FallingWord {
            text: self.settings.words[index].clone(),
            x,
            lifetime,
            age: 0.0,
        });
    }
}

impl<S: DrawingSurface> RuntimeSystem<S> for FallingTextSystem {
    fn initialize(&mut self, _surface: &S) -> Result<()> {
        info!(
            "Falling text: {} word(s), {} every {:.2}s",
            self.settings.words.len(),
            self.settings.words_per_interval,
            self.settings.interval
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameInfo) -> Result<()> {
        let dt = frame.delta_time;

        for word in &mut self.words {
            word.age += dt;
        }
        self.words.retain(|w| !w.finished());

        self.accumulator += dt;
        let mut bursts = 0;
        while self.accumulator >= self.settings.interval {
            self.accumulator -= self.settings.interval;
            bursts += 1;
            if bursts > MAX_BURSTS_PER_FRAME {
                self.accumulator = 0.0;
                break;
            }
            for _ in 0..self.settings.words_per_interval {
                self.spawn(frame.width);
            }
        }
        Ok(())
    }

    fn draw(&self, surface: &mut S) -> Result<()> {
        surface.set_global_alpha(1.0);
        let height = surface.height() as f32;
        let size = self.settings.font_size;
        for word in &self.words {
            surface.fill_text(
                &word.text,
                word.x,
                word.y(height, size),
                size,
                self.settings.color,
            );
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.words.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "falling_text"
    }
}
