//! Pinkboard Player - hosts the heart animation in a window
//!
//! This crate provides the `PlayerApp` application handler and
//! `build_driver` and `build_canvas`, which wire the particle systems onto a
//! software canvas.

mod animation;
mod player_app;

pub use animation::{build_canvas, build_driver};
pub use player_app::{run, PlayerApp, PlayerOptions};
