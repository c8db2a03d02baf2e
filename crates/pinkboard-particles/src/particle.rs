//! Particle state and the fixed-capacity ring pool

use crate::curves::ease_out_cubic;
use pinkboard_core::{DrawingSurface, SurfaceImage, Vec2};
use std::ops::Range;

/// One simulated heart. Lives in a pool slot and is only ever reinitialized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub age: f32,
}

impl Particle {
    /// Reset to a fresh particle at `(x, y)` moving with `(dx, dy)`.
    /// Acceleration is the launch velocity scaled by `effect`.
    pub fn initialize(&mut self, x: f32, y: f32, dx: f32, dy: f32, effect: f32) {
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::new(dx, dy);
        self.acceleration = Vec2::new(dx * effect, dy * effect);
        self.age = 0.0;
    }

    /// Semi-implicit Euler step: position uses the velocity from before
    /// this step's acceleration is applied.
    pub fn update(&mut self, dt: f32) {
        self.position = self.position + self.velocity * dt;
        self.velocity = self.velocity + self.acceleration * dt;
        self.age += dt;
    }

    /// Normalized age, 0 at birth and 1 at `duration`
    pub fn age_ratio(&self, duration: f32) -> f32 {
        self.age / duration
    }

    /// Draw the sprite centred on the particle, growing with an ease-out
    /// curve and fading linearly to transparent over `duration`.
    pub fn draw<S: DrawingSurface>(&self, surface: &mut S, sprite: &S::Image, duration: f32) {
        let t = self.age_ratio(duration);
        let size = sprite.width() as f32 * ease_out_cubic(t);
        surface.set_global_alpha(1.0 - t);
        surface.draw_image(
            sprite,
            self.position.x - size / 2.0,
            self.position.y - size / 2.0,
            size,
            size,
        );
    }
}

/// Ring buffer of particles with an active window `[first_active, first_free)`.
///
/// `first_active == first_free` always means empty. The backing store holds
/// one slot more than `capacity`, so a full pool keeps exactly `capacity`
/// particles. Adding to a full pool evicts the oldest particle.
pub struct ParticlePool {
    particles: Vec<Particle>,
    first_active: usize,
    first_free: usize,
    duration: f32,
    effect: f32,
}

impl ParticlePool {
    pub fn new(capacity: usize, duration: f32, effect: f32) -> Self {
        Self {
            particles: vec![Particle::default(); capacity + 1],
            first_active: 0,
            first_free: 0,
            duration,
            effect,
        }
    }

    /// Maximum number of simultaneously active particles
    pub fn capacity(&self) -> usize {
        self.particles.len() - 1
    }

    /// Number of active particles
    pub fn len(&self) -> usize {
        let slots = self.particles.len();
        (self.first_free + slots - self.first_active) % slots
    }

    pub fn is_empty(&self) -> bool {
        self.first_active == self.first_free
    }

    pub fn first_active(&self) -> usize {
        self.first_active
    }

    pub fn first_free(&self) -> usize {
        self.first_free
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.particles.len()
    }

    /// Slot ranges covered by the active window, oldest first
    fn active_ranges(&self) -> (Range<usize>, Range<usize>) {
        if self.first_active <= self.first_free {
            (self.first_active..self.first_free, 0..0)
        } else {
            (self.first_active..self.particles.len(), 0..self.first_free)
        }
    }

    /// Spawn a particle in the next free slot, evicting the oldest one if full
    pub fn add(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        let effect = self.effect;
        self.particles[self.first_free].initialize(x, y, dx, dy, effect);
        self.first_free = self.advance(self.first_free);
        if self.first_active == self.first_free {
            self.first_active = self.advance(self.first_active);
        }
    }

    /// Step every active particle, then retire expired ones from the head
    pub fn update(&mut self, dt: f32) {
        let (head, tail) = self.active_ranges();
        for i in head.chain(tail) {
            self.particles[i].update(dt);
        }

        while self.first_active != self.first_free
            && self.particles[self.first_active].age >= self.duration
        {
            self.first_active = self.advance(self.first_active);
        }
    }

    /// Draw every active particle, oldest first
    pub fn draw<S: DrawingSurface>(&self, surface: &mut S, sprite: &S::Image) {
        for particle in self.iter() {
            particle.draw(surface, sprite, self.duration);
        }
    }

    /// Active particles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        let (head, tail) = self.active_ranges();
        head.chain(tail).map(move |i| &self.particles[i])
    }
}
