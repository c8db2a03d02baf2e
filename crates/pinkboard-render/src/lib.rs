//! Pinkboard Render - turns the abstract drawing surface into pixels
//!
//! - `Canvas` rasterizes on the CPU with tiny-skia and exports PNGs
//! - `Sprite` holds the pre-rendered heart
//! - `TextRasterizer` draws the falling words with rusttype
//! - `RenderContext` and `FramePresenter` put the canvas on screen with wgpu

pub mod canvas;
mod context;
mod presenter;
pub mod sprite;
pub mod text;

pub use canvas::Canvas;
pub use context::{RenderContext, RenderError};
pub use presenter::FramePresenter;
pub use sprite::Sprite;
pub use text::TextRasterizer;
