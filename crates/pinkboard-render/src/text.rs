//! Text rasterization with rusttype
//!
//! Fonts come either from a file named in the settings or from the
//! system's sans-serif family, located through fontdb.

use pinkboard_core::{Color, PinkboardError, Result};
use rusttype::{point, Font, Scale};
use std::path::Path;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// A run of text rendered into its own premultiplied pixmap
pub struct RasterizedText {
    pub pixmap: Pixmap,
    /// Offset of the pixmap's top-left corner from the text origin
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Turns strings into coverage pixmaps using one loaded font
pub struct TextRasterizer {
    font: Font<'static>,
}

impl TextRasterizer {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Font::try_from_vec(data)
            .map(|font| Self { font })
            .ok_or_else(|| PinkboardError::ParseError("not a TrueType/OpenType font".into()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rasterizer = Self::from_bytes(std::fs::read(path)?)?;
        log::info!("Loaded font {}", path.display());
        Ok(rasterizer)
    }

    /// The first sans-serif face installed on this machine, or any face at all
    pub fn system_sans_serif() -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("System fonts loaded: {} faces", db.faces().count());

        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..Default::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| PinkboardError::RenderError("no system fonts found".into()))?;

        db.with_face_data(id, |data, index| {
            Font::try_from_vec_and_index(data.to_vec(), index)
        })
        .flatten()
        .map(|font| Self { font })
        .ok_or_else(|| PinkboardError::RenderError("system font could not be parsed".into()))
    }

    /// Render `text` with a line height of `size` pixels. `None` when nothing
    /// would be visible.
    pub fn rasterize(
        &self,
        text: &str,
        size: f32,
        color: Color,
        alpha: f32,
    ) -> Option<RasterizedText> {
        if size <= 0.0 || alpha <= 0.0 {
            return None;
        }
        let scale = Scale::uniform(size);
        let ascent = self.font.v_metrics(scale).ascent;
        let glyphs: Vec<_> = self
            .font
            .layout(text, scale, point(0.0, ascent))
            .filter_map(|glyph| glyph.pixel_bounding_box().map(|bb| (glyph, bb)))
            .collect();

        let (min_x, min_y, max_x, max_y) = glyphs.iter().fold(
            (i32::MAX, i32::MAX, i32::MIN, i32::MIN),
            |(x0, y0, x1, y1), (_, bb)| {
                (x0.min(bb.min.x), y0.min(bb.min.y), x1.max(bb.max.x), y1.max(bb.max.y))
            },
        );
        if glyphs.is_empty() || max_x <= min_x || max_y <= min_y {
            return None;
        }

        let width = (max_x - min_x) as u32;
        let height = (max_y - min_y) as u32;
        let mut pixmap = Pixmap::new(width, height)?;
        let [r, g, b, _] = color.to_rgba8();
        let opacity = (color.a * alpha).clamp(0.0, 1.0);

        let pixels = pixmap.pixels_mut();
        for (glyph, bb) in &glyphs {
            glyph.draw(|gx, gy, coverage| {
                let px = (bb.min.x - min_x) as u32 + gx;
                let py = (bb.min.y - min_y) as u32 + gy;
                let a = (coverage * opacity * 255.0).round().clamp(0.0, 255.0) as u8;
                let idx = (py * width + px) as usize;
                // Overlapping glyph boxes keep the stronger coverage
                if a > pixels[idx].alpha() {
                    if let Some(p) = PremultipliedColorU8::from_rgba(
                        premultiply(r, a),
                        premultiply(g, a),
                        premultiply(b, a),
                        a,
                    ) {
                        pixels[idx] = p;
                    }
                }
            });
        }

        Some(RasterizedText {
            pixmap,
            offset_x: min_x,
            offset_y: min_y,
        })
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_font() -> Option<TextRasterizer> {
        match TextRasterizer::system_sans_serif() {
            Ok(font) => Some(font),
            Err(e) => {
                eprintln!("skipping: {e}");
                None
            }
        }
    }

    fn coverage(text: &RasterizedText) -> u64 {
        text.pixmap.pixels().iter().map(|p| u64::from(p.alpha())).sum()
    }

    #[test]
    fn digits_and_punctuation_are_drawn() {
        let Some(font) = system_font() else { return };
        let full = font.rasterize("i <3 u!", 24.0, Color::WHITE, 1.0).unwrap();
        let letters = font.rasterize("i    u ", 24.0, Color::WHITE, 1.0).unwrap();
        assert!(coverage(&full) > coverage(&letters));
    }

    #[test]
    fn case_is_preserved() {
        let Some(font) = system_font() else { return };
        let lower = font.rasterize("love", 24.0, Color::WHITE, 1.0).unwrap();
        let upper = font.rasterize("LOVE", 24.0, Color::WHITE, 1.0).unwrap();
        assert_ne!(lower.pixmap.data(), upper.pixmap.data());
    }

    #[test]
    fn invisible_text_yields_nothing() {
        let Some(font) = system_font() else { return };
        assert!(font.rasterize("   ", 24.0, Color::WHITE, 1.0).is_none());
        assert!(font.rasterize("", 24.0, Color::WHITE, 1.0).is_none());
        assert!(font.rasterize("hi", 0.0, Color::WHITE, 1.0).is_none());
        assert!(font.rasterize("hi", 24.0, Color::WHITE, 0.0).is_none());
    }

    #[test]
    fn output_is_premultiplied_and_tinted() {
        let Some(font) = system_font() else { return };
        let red = Color::from_hex(0xff0000);
        let text = font.rasterize("H", 32.0, red, 0.5).unwrap();
        let mut seen = false;
        for p in text.pixmap.pixels() {
            assert!(p.red() <= p.alpha());
            assert_eq!((p.green(), p.blue()), (0, 0));
            assert!(p.alpha() <= 128);
            seen |= p.alpha() > 0;
        }
        assert!(seen);
    }

    #[test]
    fn glyphs_sit_below_the_origin() {
        let Some(font) = system_font() else { return };
        let text = font.rasterize("H", 20.0, Color::WHITE, 1.0).unwrap();
        assert!(text.offset_y >= 0);
        assert!(text.offset_y + text.pixmap.height() as i32 <= 21);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(
            TextRasterizer::from_bytes(b"definitely not a font".to_vec()),
            Err(PinkboardError::ParseError(_))
        ));
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        assert!(matches!(
            TextRasterizer::load("/nonexistent/pinkboard.ttf"),
            Err(PinkboardError::IoError(_))
        ));
    }
}
