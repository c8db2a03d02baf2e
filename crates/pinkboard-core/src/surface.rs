//! The immediate-mode 2D surface every system draws on

use crate::error::Result;
use crate::types::Color;

/// An image that can be blitted onto a [`DrawingSurface`]
pub trait SurfaceImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Immediate-mode 2D drawing surface with a mutable pixel size.
///
/// Coordinates are in surface pixels with the origin at the top-left and
/// y growing downwards. Every image and text draw is multiplied by the
/// current global alpha, which persists until changed.
pub trait DrawingSurface {
    type Image: SurfaceImage;

    /// Pixel width of the backing store
    fn width(&self) -> u32;

    /// Pixel height of the backing store
    fn height(&self) -> u32;

    /// Resize the backing store. Contents are discarded.
    fn set_size(&mut self, width: u32, height: u32) -> Result<()>;

    /// Reset the given rectangle to fully transparent
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_global_alpha(&mut self, alpha: f32);

    fn global_alpha(&self) -> f32;

    /// Draw `image` scaled into the rectangle at `(x, y)` of `width` x `height`
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32, width: f32, height: f32);

    /// Draw `text` with its top-left corner at `(x, y)` and a line height of `size` pixels
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// Clear the whole surface
    fn clear(&mut self) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        self.clear_rect(0.0, 0.0, w, h);
    }
}
