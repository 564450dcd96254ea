use cosmic_text::{
    Align, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight, fontdb,
};
use constants::text::{BITMAP_HEIGHT, BITMAP_WIDTH, FONT_SIZE_PX};

use super::bitmap::GlyphBitmap;
use crate::engine::error::BackgroundError;

/// Renders words white-on-black into fixed-size bitmaps with one font.
pub struct GlyphRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    family: String,
    width: u32,
    height: u32,
    font_size: f32,
}

impl GlyphRasterizer {
    /// Build from raw font bytes, using the first family the data declares.
    pub fn from_font_data(font_path: &str, data: Vec<u8>) -> Result<Self, BackgroundError> {
        let mut db = fontdb::Database::new();
        db.load_font_data(data);

        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| BackgroundError::AssetLoad {
                path: font_path.to_string(),
                reason: "font data contains no usable face".to_string(),
            })?;

        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            swash_cache: SwashCache::new(),
            family,
            width: BITMAP_WIDTH,
            height: BITMAP_HEIGHT,
            font_size: FONT_SIZE_PX,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Bold text centred horizontally and vertically on a black bitmap.
    pub fn rasterize(&mut self, word: &str) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(self.width, self.height);

        let metrics = Metrics::new(self.font_size, self.font_size);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(
            &mut self.font_system,
            Some(self.width as f32),
            Some(self.height as f32),
        );
        let attrs = Attrs::new()
            .family(Family::Name(&self.family))
            .weight(Weight::BOLD);
        buffer.set_text(
            &mut self.font_system,
            word,
            &attrs,
            Shaping::Advanced,
            Some(Align::Center),
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let (top, bottom) = buffer
            .layout_runs()
            .fold((f32::MAX, f32::MIN), |(top, bottom), run| {
                (top.min(run.line_top), bottom.max(run.line_top + run.line_height))
            });
        let offset_y = if top <= bottom {
            ((self.height as f32 - (bottom - top)) * 0.5 - top).round() as i32
        } else {
            0
        };

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgb(255, 255, 255),
            |x, y, w, h, color| {
                let alpha = color.a();
                if alpha == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        bitmap.brighten(x + dx, y + dy + offset_y, alpha);
                    }
                }
            },
        );

        bitmap
    }
}
