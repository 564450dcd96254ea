use bevy::prelude::*;
use constants::text::{ROW_SPACING, SCALE_TIERS, TEXT_DEPTH};

use super::sampler::SampledPixel;
use crate::engine::particles::particle_set::{ParticleSet, TextTarget};

/// World units per bitmap pixel for a viewport width.
pub fn text_scale_for_width(width: f32) -> f32 {
    SCALE_TIERS
        .iter()
        .find(|(max_width, _)| width <= *max_width)
        .or(SCALE_TIERS.last())
        .map(|(_, scale)| *scale)
        .unwrap_or(0.015)
}

/// Map a bitmap pixel into model space. Words stack top to bottom, one
/// row apart, on a plane at fixed depth.
pub fn pixel_to_model(pixel: &SampledPixel, width: u32, height: u32, scale: f32) -> Vec3 {
    let x = (pixel.x as f32 - width as f32 / 2.0) * scale;
    let y = (height as f32 / 2.0 - pixel.y as f32) * scale;
    let row_offset = (1.0 - pixel.group as f32) * ROW_SPACING;
    Vec3::new(x, y + row_offset, TEXT_DEPTH)
}

/// Sampled word pixels kept for the session so resizes can re-lay them
/// out without sampling again.
#[derive(Resource, Debug, Clone)]
pub struct TextLayout {
    pixels: Vec<SampledPixel>,
    bitmap_width: u32,
    bitmap_height: u32,
    scale: f32,
}

impl TextLayout {
    pub fn new(pixels: Vec<SampledPixel>, bitmap_width: u32, bitmap_height: u32, scale: f32) -> Self {
        Self {
            pixels,
            bitmap_width,
            bitmap_height,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Per-particle targets; particle `i` takes pixel `i`.
    pub fn targets(&self) -> Vec<Option<TextTarget>> {
        self.pixels
            .iter()
            .map(|pixel| {
                Some(TextTarget {
                    position: pixel_to_model(pixel, self.bitmap_width, self.bitmap_height, self.scale),
                    group: pixel.group,
                })
            })
            .collect()
    }

    pub fn apply(&self, set: &mut ParticleSet) {
        set.set_targets(self.targets());
    }

    /// Switch to the scale tier for a new width. Returns true if it changed.
    pub fn rescale_for_width(&mut self, viewport_width: f32) -> bool {
        let scale = text_scale_for_width(viewport_width);
        if (scale - self.scale).abs() <= f32::EPSILON {
            return false;
        }
        self.scale = scale;
        true
    }
}
