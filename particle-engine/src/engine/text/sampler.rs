use constants::text::{MAX_ATTEMPT_FACTOR, SAMPLE_DENSITY};
use rand::Rng;

use super::bitmap::GlyphBitmap;
use crate::engine::error::BackgroundError;

/// One accepted foreground pixel and the word it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledPixel {
    pub x: u32,
    pub y: u32,
    pub group: usize,
}

/// Result of sampling every word against one particle budget.
#[derive(Debug, Clone, Default)]
pub struct TextSampling {
    /// Accepted pixels in particle order: pixel `i` belongs to particle `i`.
    pub pixels: Vec<SampledPixel>,
    /// Words that came out with fewer points than requested.
    pub shortfalls: Vec<BackgroundError>,
}

/// Points a word asks for: its foreground share of the canvas, doubled,
/// times the particle count.
pub fn target_point_count(bitmap: &GlyphBitmap, total_particles: usize) -> usize {
    (bitmap.coverage() * total_particles as f32 * SAMPLE_DENSITY).floor() as usize
}

/// Rejection-sample foreground pixels for one word.
///
/// Draws uniformly over the whole canvas and keeps foreground hits until
/// `target` points are accepted, the attempt budget runs out, or
/// `capacity` is exhausted.
pub fn sample_word<R: Rng + ?Sized>(
    bitmap: &GlyphBitmap,
    group: usize,
    target: usize,
    capacity: usize,
    rng: &mut R,
) -> Vec<SampledPixel> {
    let limit = target.min(capacity);
    let max_attempts = target.saturating_mul(MAX_ATTEMPT_FACTOR);
    let mut accepted = Vec::with_capacity(limit);
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return accepted;
    }

    let mut attempts = 0;
    while accepted.len() < limit && attempts < max_attempts {
        let x = rng.random_range(0..bitmap.width());
        let y = rng.random_range(0..bitmap.height());
        if bitmap.is_foreground(x, y) {
            accepted.push(SampledPixel { x, y, group });
        }
        attempts += 1;
    }
    accepted
}

/// Sample every word in order, filling particles front to back.
///
/// Sampling stops once every particle has a pixel. Words that fall short
/// are reported but keep the points they did get.
pub fn sample_words<R: Rng + ?Sized>(
    words: &[(&str, &GlyphBitmap)],
    total_particles: usize,
    rng: &mut R,
) -> TextSampling {
    let mut sampling = TextSampling::default();

    for (group, (word, bitmap)) in words.iter().enumerate() {
        let capacity = total_particles.saturating_sub(sampling.pixels.len());
        if capacity == 0 {
            break;
        }

        let requested = target_point_count(bitmap, total_particles);
        let accepted = sample_word(bitmap, group, requested, capacity, rng);
        if accepted.len() < requested {
            sampling.shortfalls.push(BackgroundError::InsufficientSampling {
                word: word.to_string(),
                requested,
                accepted: accepted.len(),
            });
        }
        sampling.pixels.extend(accepted);
    }

    sampling
}
