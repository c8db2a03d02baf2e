//! In-memory surface that records every draw call, for tests

use crate::error::{PinkboardError, Result};
use crate::surface::{DrawingSurface, SurfaceImage};
use crate::types::Color;

/// A square stand-in image of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestImage {
    pub size: u32,
}

impl SurfaceImage for TestImage {
    fn width(&self) -> u32 {
        self.size
    }

    fn height(&self) -> u32 {
        self.size
    }
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        alpha: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        alpha: f32,
    },
}

/// Surface that keeps a log of calls instead of pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub alpha: f32,
    pub calls: Vec<DrawCall>,
    pub resizes: Vec<(u32, u32)>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            calls: Vec::new(),
            resizes: Vec::new(),
        }
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Text { .. }))
    }
}

impl DrawingSurface for RecordingSurface {
    type Image = TestImage;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PinkboardError::SurfaceUnavailable(format!(
                "cannot resize to {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        self.resizes.push((width, height));
        Ok(())
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn draw_image(&mut self, _image: &TestImage, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Image {
            x,
            y,
            width,
            height,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, _color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            size,
            alpha: self.alpha,
        });
    }
}
