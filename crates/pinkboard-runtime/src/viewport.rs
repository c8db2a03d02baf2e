//! Keeps the drawing surface's pixel size equal to its displayed size

use log::{debug, warn};
use pinkboard_core::{DrawingSurface, Result};

/// Remembers the last displayed size reported by the host and pushes it
/// onto the surface. Particles are not moved when the surface changes size.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewportSync {
    displayed: Option<(u32, u32)>,
}

impl ViewportSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a known displayed size (e.g. the window's inner size)
    pub fn with_displayed_size(width: u32, height: u32) -> Self {
        Self {
            displayed: Some((width, height)),
        }
    }

    pub fn displayed_size(&self) -> Option<(u32, u32)> {
        self.displayed
    }

    /// Handle a resize notification. Returns true if the surface changed.
    pub fn on_resize<S: DrawingSurface>(
        &mut self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) -> Result<bool> {
        if width == 0 || height == 0 {
            warn!("Ignoring resize to {}x{}", width, height);
            return Ok(false);
        }
        self.displayed = Some((width, height));
        self.apply(surface)
    }

    /// Re-apply the last displayed size. Returns true if the surface changed.
    pub fn apply<S: DrawingSurface>(&self, surface: &mut S) -> Result<bool> {
        let Some((width, height)) = self.displayed else {
            return Ok(false);
        };
        if surface.width() == width && surface.height() == height {
            return Ok(false);
        }
        debug!(
            "Viewport {}x{} -> {}x{}",
            surface.width(),
            surface.height(),
            width,
            height
        );
        surface.set_size(width, height)?;
        Ok(true)
    }
}
