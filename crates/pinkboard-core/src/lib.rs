//! Pinkboard Core - Foundational types for the Pinkboard animation
//!
//! This crate provides the core types that all other Pinkboard crates depend on:
//! - `Vec2` - 2D point/vector with length and normalization
//! - `Color` - RGBA color with hex parsing
//! - `DrawingSurface` - the immediate-mode 2D surface the animation draws on
//! - Error types and Result alias

mod error;
mod surface;
mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{PinkboardError, Result};
pub use surface::{DrawingSurface, SurfaceImage};
pub use types::{Color, Vec2};
