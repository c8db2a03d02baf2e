//! CPU drawing surface backed by a tiny-skia pixmap

use crate::sprite::Sprite;
use crate::text::TextRasterizer;
use pinkboard_core::{Color, DrawingSurface, PinkboardError, Result};
use std::path::Path;
use tiny_skia::{BlendMode, FilterQuality, Paint, Pixmap, PixmapPaint, Rect, Transform};

/// The surface the animation draws into. Contents are premultiplied RGBA
/// and start fully transparent. Without a text rasterizer `fill_text`
/// draws nothing.
pub struct Canvas {
    pixmap: Pixmap,
    alpha: f32,
    text: Option<TextRasterizer>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            alpha: 1.0,
            text: None,
        })
    }

    pub fn with_text(mut self, rasterizer: TextRasterizer) -> Self {
        self.text = Some(rasterizer);
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA8 rows, top to bottom
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        pixmap_to_image(&self.pixmap)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_rgba_image()?
            .save_with_format(path.as_ref(), image::ImageFormat::Png)
            .map_err(|e| PinkboardError::ImageError(e.to_string()))
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        PinkboardError::SurfaceUnavailable(format!("cannot allocate {width}x{height} canvas"))
    })
}

/// Demultiply a pixmap into a straight-alpha image
pub(crate) fn pixmap_to_image(pixmap: &Pixmap) -> Result<image::RgbaImage> {
    let pixels: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixels)
        .ok_or_else(|| PinkboardError::ImageError("pixel buffer size mismatch".into()))
}

impl DrawingSurface for Canvas {
    type Image = Sprite;

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.pixmap = allocate(width, height)?;
        Ok(())
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            anti_alias: false,
            ..Paint::default()
        };
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn draw_image(&mut self, image: &Sprite, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 || self.alpha <= 0.0 {
            return;
        }
        let source = image.pixmap();
        let sx = width / source.width() as f32;
        let sy = height / source.height() as f32;
        let paint = PixmapPaint {
            opacity: self.alpha,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, x, y),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let Some(rasterizer) = &self.text else {
            return;
        };
        let Some(run) = rasterizer.rasterize(text, size, color, self.alpha) else {
            return;
        };
        self.pixmap.draw_pixmap(
            x.round() as i32 + run.offset_x,
            y.round() as i32 + run.offset_y,
            run.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(canvas: &Canvas, x: u32, y: u32) -> u8 {
        canvas.pixmap().pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    fn opaque_square(size: u32) -> Sprite {
        let mut pixmap = Pixmap::new(size, size).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 255, 255, 255));
        Sprite::from_pixmap(pixmap)
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 4).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (8, 4));
        assert!(canvas.data().iter().all(|&b| b == 0));
        assert_eq!(canvas.global_alpha(), 1.0);
    }

    #[test]
    fn zero_size_is_unavailable() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(PinkboardError::SurfaceUnavailable(_))
        ));
        let mut canvas = Canvas::new(4, 4).unwrap();
        assert!(canvas.set_size(10, 0).is_err());
        assert_eq!((canvas.width(), canvas.height()), (4, 4));
    }

    #[test]
    fn set_size_discards_contents() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.draw_image(&opaque_square(2), 0.0, 0.0, 4.0, 4.0);
        canvas.set_size(6, 3).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (6, 3));
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn draw_image_scales_into_the_target_rect() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.draw_image(&opaque_square(4), 5.0, 5.0, 10.0, 10.0);
        assert_eq!(alpha_at(&canvas, 10, 10), 255);
        assert_eq!(alpha_at(&canvas, 2, 2), 0);
        assert_eq!(alpha_at(&canvas, 17, 17), 0);
    }

    #[test]
    fn global_alpha_scales_image_opacity() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.set_global_alpha(0.5);
        canvas.draw_image(&opaque_square(10), 0.0, 0.0, 10.0, 10.0);
        let a = alpha_at(&canvas, 5, 5);
        assert!((126..=129).contains(&a), "alpha was {a}");

        canvas.set_global_alpha(0.0);
        canvas.clear();
        canvas.draw_image(&opaque_square(10), 0.0, 0.0, 10.0, 10.0);
        assert_eq!(alpha_at(&canvas, 5, 5), 0);
    }

    #[test]
    fn zero_sized_draws_are_skipped() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_image(&opaque_square(4), 5.0, 5.0, 0.0, 0.0);
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_rect_only_touches_its_rectangle() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_image(&opaque_square(10), 0.0, 0.0, 10.0, 10.0);
        canvas.clear_rect(0.0, 0.0, 5.0, 10.0);
        assert_eq!(alpha_at(&canvas, 2, 5), 0);
        assert_eq!(alpha_at(&canvas, 7, 5), 255);

        canvas.clear();
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    fn text_canvas(width: u32, height: u32) -> Option<Canvas> {
        match TextRasterizer::system_sans_serif() {
            Ok(font) => Some(Canvas::new(width, height).unwrap().with_text(font)),
            Err(e) => {
                eprintln!("skipping: {e}");
                None
            }
        }
    }

    #[test]
    fn fill_text_without_a_font_is_a_no_op() {
        let mut canvas = Canvas::new(40, 20).unwrap();
        assert!(!canvas.has_text());
        canvas.fill_text("I love you", 0.0, 0.0, 14.0, Color::WHITE);
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_text_draws_below_and_right_of_its_origin() {
        let Some(mut canvas) = text_canvas(80, 60) else { return };
        canvas.fill_text("I <3 U!", 10.0, 20.0, 16.0, Color::WHITE);
        let pixmap = canvas.pixmap();
        let mut drawn = 0;
        for y in 0..pixmap.height() {
            for x in 0..pixmap.width() {
                if alpha_at(&canvas, x, y) > 0 {
                    drawn += 1;
                    assert!(x >= 9 && y >= 19, "ink at ({x}, {y})");
                    assert!(y <= 37, "ink at ({x}, {y})");
                }
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn fill_text_respects_global_alpha() {
        let Some(mut canvas) = text_canvas(60, 30) else { return };
        canvas.set_global_alpha(0.0);
        canvas.fill_text("hello", 0.0, 0.0, 20.0, Color::WHITE);
        assert!(canvas.data().iter().all(|&b| b == 0));

        canvas.set_global_alpha(0.25);
        canvas.fill_text("hello", 0.0, 0.0, 20.0, Color::WHITE);
        let max = canvas.pixmap().pixels().iter().map(|p| p.alpha()).max().unwrap();
        assert!(max > 0 && max <= 64, "max alpha {max}");
    }

    #[test]
    fn exported_image_is_straight_alpha() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(200, 100, 50, 255));
        canvas.set_global_alpha(0.5);
        canvas.draw_image(&Sprite::from_pixmap(pixmap), 0.0, 0.0, 4.0, 4.0);

        let image = canvas.to_rgba_image().unwrap();
        let [r, g, b, a] = image.get_pixel(1, 1).0;
        assert!((r as i32 - 200).abs() <= 2);
        assert!((g as i32 - 100).abs() <= 2);
        assert!((b as i32 - 50).abs() <= 2);
        assert!((126..=129).contains(&a));
    }
}
