//! Runtime system trait

use pinkboard_core::{DrawingSurface, Result};

/// Per-frame inputs shared by every system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Seconds since the previous frame, never negative
    pub delta_time: f32,
    /// Surface pixel width at the start of the frame
    pub width: u32,
    /// Surface pixel height at the start of the frame
    pub height: u32,
    /// Zero-based frame number
    pub frame: u64,
}

impl FrameInfo {
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// A system that is ticked by the animation driver
///
/// Systems are updated, then drawn, in registration order, once per frame.
pub trait RuntimeSystem<S: DrawingSurface> {
    /// Called once before the first frame, after the viewport is synced
    fn initialize(&mut self, surface: &S) -> Result<()>;

    /// Advance simulation state by one frame
    fn update(&mut self, frame: &FrameInfo) -> Result<()>;

    /// Draw the current state onto an already-cleared surface
    fn draw(&self, surface: &mut S) -> Result<()>;

    /// Called when the driver is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
