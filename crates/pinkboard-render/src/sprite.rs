//! Pre-rendered heart sprite

use pinkboard_core::{Color, PinkboardError, Result, SurfaceImage};
use pinkboard_particles::heart::{outline, OUTLINE_STEP, SPRITE_EXTENT};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// A premultiplied RGBA bitmap that a [`Canvas`](crate::Canvas) can blit
pub struct Sprite {
    pixmap: Pixmap,
}

impl Sprite {
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Rasterize the heart outline filled with `color` into a `size` x `size`
    /// square. Curve units map to `size / SPRITE_EXTENT` pixels with the
    /// curve's origin at the centre and y flipped to point down.
    pub fn heart(size: u32, color: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(size, size).ok_or_else(|| {
            PinkboardError::SurfaceUnavailable(format!("cannot allocate {size}x{size} sprite"))
        })?;

        let half = size as f32 / 2.0;
        let scale = size as f32 / SPRITE_EXTENT;
        let mut builder = PathBuilder::new();
        for (i, p) in outline(OUTLINE_STEP).enumerate() {
            let (x, y) = (half + p.x * scale, half - p.y * scale);
            if i == 0 {
                builder.move_to(x, y);
            } else {
                builder.line_to(x, y);
            }
        }
        builder.close();
        let path = builder.finish().ok_or_else(|| {
            PinkboardError::RenderError("heart outline produced an empty path".into())
        })?;

        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA copy, e.g. for saving to disk
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        crate::canvas::pixmap_to_image(&self.pixmap)
    }
}

impl SurfaceImage for Sprite {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(sprite: &Sprite, x: u32, y: u32) -> u8 {
        sprite.pixmap().pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    #[test]
    fn heart_is_filled_in_the_middle_and_empty_in_the_corners() {
        let sprite = Sprite::heart(30, Color::from_hex(0xEA80B0)).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (30, 30));

        assert_eq!(alpha_at(&sprite, 15, 15), 255);
        assert_eq!(alpha_at(&sprite, 0, 0), 0);
        assert_eq!(alpha_at(&sprite, 29, 29), 0);
    }

    #[test]
    fn heart_has_the_requested_colour() {
        let sprite = Sprite::heart(64, Color::from_hex(0xEA80B0)).unwrap();
        let image = sprite.to_rgba_image().unwrap();
        let centre = image.get_pixel(32, 32);
        assert_eq!(centre.0, [0xEA, 0x80, 0xB0, 0xFF]);
    }

    #[test]
    fn cleft_sits_above_the_centre() {
        // The top of the curve is at y = 75, so the sprite row just above
        // the cleft is empty on the centre line but filled on the lobes.
        let sprite = Sprite::heart(350, Color::WHITE).unwrap();
        assert_eq!(alpha_at(&sprite, 175, 175 - 90), 0);
        assert_eq!(alpha_at(&sprite, 175 - 80, 175 - 90), 255);
        assert_eq!(alpha_at(&sprite, 175 + 80, 175 - 90), 255);
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(Sprite::heart(0, Color::WHITE).is_err());
    }
}
