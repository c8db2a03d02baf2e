//! Spawns hearts along the curve and runs the pool every frame

use crate::heart::spawn_on_heart;
use crate::particle::ParticlePool;
use crate::settings::ParticleSettings;
use log::info;
use pinkboard_core::{DrawingSurface, Result, SurfaceImage};
use pinkboard_runtime::{FrameInfo, RuntimeSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The heart particle system - implements RuntimeSystem for the animation driver.
pub struct HeartSystem<I> {
    pool: ParticlePool,
    sprite: I,
    settings: ParticleSettings,
    rng: StdRng,
}

impl<I: SurfaceImage> HeartSystem<I> {
    pub fn new(settings: ParticleSettings, sprite: I) -> Self {
        Self::with_rng(settings, sprite, StdRng::from_os_rng())
    }

    /// Deterministic spawns for offscreen rendering and tests
    pub fn with_seed(settings: ParticleSettings, sprite: I, seed: u64) -> Self {
        Self::with_rng(settings, sprite, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: ParticleSettings, sprite: I, rng: StdRng) -> Self {
        let pool = ParticlePool::new(settings.length, settings.duration, settings.effect);
        Self {
            pool,
            sprite,
            settings,
            rng,
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// How many particles a frame of `delta_time` seconds emits: one for
    /// every whole or partial unit of `rate * delta_time`, with no carry-over
    /// between frames. Capped at the pool capacity since anything beyond
    /// would be evicted within the same frame.
    pub fn emission_count(&self, delta_time: f32) -> usize {
        let amount = self.settings.emission_rate() * delta_time;
        if !amount.is_finite() || amount <= 0.0 {
            return 0;
        }
        (amount.ceil() as usize).min(self.pool.capacity())
    }

    /// Spawn one particle for uniform sample `u`, centred on `(cx, cy)` in
    /// screen coordinates (y down)
    pub fn emit(&mut self, u: f32, cx: f32, cy: f32) {
        let spawn = spawn_on_heart(u, self.settings.velocity);
        self.pool.add(
            cx + spawn.position.x,
            cy - spawn.position.y,
            spawn.velocity.x,
            -spawn.velocity.y,
        );
    }
}

impl<S> RuntimeSystem<S> for HeartSystem<S::Image>
where
    S: DrawingSurface,
{
    fn initialize(&mut self, surface: &S) -> Result<()> {
        info!(
            "Heart particles: capacity {}, {:.0}/s, sprite {}px, surface {}x{}",
            self.pool.capacity(),
            self.settings.emission_rate(),
            self.sprite.width(),
            surface.width(),
            surface.height()
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameInfo) -> Result<()> {
        let (cx, cy) = frame.center();
        for _ in 0..self.emission_count(frame.delta_time) {
            let u: f32 = self.rng.random();
            self.emit(u, cx, cy);
        }
        self.pool.update(frame.delta_time);
        Ok(())
    }

    fn draw(&self, surface: &mut S) -> Result<()> {
        self.pool.draw(surface, &self.sprite);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "hearts"
    }
}
