//! Pinkboard Particles - the heart animation and its decorations
//!
//! Provides:
//! - `ParticlePool` - ring buffer with an active window and oldest-first eviction
//! - Heart curve sampling for spawn points and the sprite outline
//! - `HeartSystem` - spawns along the curve at `capacity / duration` per second
//! - `FallingTextSystem` - words dropping from the top on a repeating timer
//! - `Settings` - the static parameter set, optionally read from TOML

pub mod curves;
pub mod falling_text;
pub mod heart;
pub mod heart_system;
pub mod particle;
pub mod settings;

pub use falling_text::{FallingTextSystem, FallingWord};
pub use heart::{point_on_heart, spawn_on_heart, Spawn};
pub use heart_system::HeartSystem;
pub use particle::{Particle, ParticlePool};
pub use settings::{FallingTextSettings, ParticleSettings, Settings};
