use bevy::prelude::*;
use constants::particles::PARTICLES_PER_LETTER;
use rand::Rng;

use super::bitmap::GlyphBitmap;
use super::layout::{TextLayout, text_scale_for_width};
use super::rasterizer::GlyphRasterizer;
use super::sampler::sample_words;
use crate::engine::error::BackgroundError;
use crate::engine::particles::particle_set::ParticleSet;

/// Particles needed so every letter gets a dense enough outline.
pub fn required_particles<'a>(words: impl IntoIterator<Item = &'a str>) -> usize {
    words
        .into_iter()
        .map(|word| word.chars().filter(|c| !c.is_whitespace()).count())
        .sum::<usize>()
        * PARTICLES_PER_LETTER
}

/// Grow the set to the letter budget, sample every bitmap and hand each
/// sampled particle its target.
pub fn form_words<R: Rng + ?Sized>(
    bitmaps: &[(&str, GlyphBitmap)],
    set: &mut ParticleSet,
    viewport_width: f32,
    rng: &mut R,
) -> (TextLayout, Vec<BackgroundError>) {
    let required = required_particles(bitmaps.iter().map(|(word, _)| *word));
    if set.ensure_capacity(required, rng) {
        debug!("Particle set tiled up to {} for text", set.len());
    }

    let words: Vec<(&str, &GlyphBitmap)> =
        bitmaps.iter().map(|(word, bitmap)| (*word, bitmap)).collect();
    let sampling = sample_words(&words, set.len(), rng);

    let (width, height) = bitmaps
        .first()
        .map(|(_, bitmap)| (bitmap.width(), bitmap.height()))
        .unwrap_or_default();
    let layout = TextLayout::new(sampling.pixels, width, height, text_scale_for_width(viewport_width));
    layout.apply(set);

    (layout, sampling.shortfalls)
}

/// Rasterise `words` with the loaded font and build their targets.
pub fn build_text_layout<R: Rng + ?Sized>(
    rasterizer: &mut GlyphRasterizer,
    words: &[&str],
    set: &mut ParticleSet,
    viewport_width: f32,
    rng: &mut R,
) -> TextLayout {
    let bitmaps: Vec<(&str, GlyphBitmap)> = words
        .iter()
        .map(|word| (*word, rasterizer.rasterize(word)))
        .collect();

    let (layout, shortfalls) = form_words(&bitmaps, set, viewport_width, rng);
    for shortfall in &shortfalls {
        debug!("{shortfall}");
    }
    info!(
        "Text targets ready: {} of {} particles assigned across {} words",
        layout.len(),
        set.len(),
        words.len()
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bar_bitmap() -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(128, 32);
        for y in 8..24 {
            for x in 16..112 {
                bitmap.brighten(x, y, 255);
            }
        }
        bitmap
    }

    #[test]
    fn letter_budget_ignores_spaces() {
        assert_eq!(required_particles(["ABOUT", "SERVICES", "CONTACT"]), 20 * 300);
        assert_eq!(required_particles(["A B"]), 600);
    }

    #[test]
    fn forming_words_grows_set_and_assigns_groups() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut set = ParticleSet::new(vec![Vec3::ZERO; 100], Vec::new());
        let bitmaps = [("AB", bar_bitmap()), ("C", bar_bitmap())];

        let (layout, _) = form_words(&bitmaps, &mut set, 1920.0, &mut rng);

        assert_eq!(set.len(), 900);
        assert!(!layout.is_empty());
        assert_eq!(set.targeted_count(), layout.len());
        assert_eq!(set.group(0), Some(0));
        assert!((0..set.len()).filter_map(|i| set.group(i)).all(|g| g < 2));
        let first = set.target(0).unwrap();
        assert_eq!(first.position.z, 5.0);
    }
}
