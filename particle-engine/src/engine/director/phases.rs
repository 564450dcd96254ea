use constants::animation::{
    CONTENT_FADE_RATE, DISSOLVE_BAND, DISSOLVE_CAP, REASSEMBLE_BAND, SCROLLED_THRESHOLD,
    TEXT_FADE_BAND, ZOOM_BAND, ZOOM_MAX,
};

/// Blend weights derived from a single scroll progress value.
///
/// Each weight is an independent clamped ramp over its own band, so
/// several can be non-zero at once near band edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationPhase {
    pub text_fade: f32,
    pub zoom: f32,
    pub dissolve: f32,
    pub reassemble: f32,
}

impl AnimationPhase {
    pub fn from_scroll(scroll_progress: f32) -> Self {
        let s = if scroll_progress.is_finite() {
            scroll_progress.max(0.0)
        } else {
            0.0
        };

        Self {
            text_fade: ramp(s, TEXT_FADE_BAND),
            zoom: ramp(s, ZOOM_BAND) * ZOOM_MAX,
            dissolve: ramp(s, DISSOLVE_BAND) * DISSOLVE_CAP,
            reassemble: ramp(s, REASSEMBLE_BAND),
        }
    }

    /// Opacity of the page content layered above the canvas.
    pub fn content_opacity(&self) -> f32 {
        (1.0 - self.text_fade * CONTENT_FADE_RATE).max(0.0)
    }

    /// Dissolve normalised to [0, 1] against its cap.
    pub fn dissolve_fraction(&self) -> f32 {
        (self.dissolve / DISSOLVE_CAP).clamp(0.0, 1.0)
    }

    pub fn fully_dissolved(&self) -> bool {
        self.dissolve >= DISSOLVE_CAP
    }

    pub fn fully_reassembled(&self) -> bool {
        self.reassemble >= 1.0
    }
}

/// Whether the page counts as scrolled for host styling.
pub fn is_scrolled(scroll_progress: f32) -> bool {
    scroll_progress > SCROLLED_THRESHOLD
}

fn ramp(s: f32, (start, end): (f32, f32)) -> f32 {
    if s <= start {
        0.0
    } else {
        ((s - start) / (end - start)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn phases_are_monotonic_in_scroll() {
        let mut previous = AnimationPhase::from_scroll(0.0);
        for step in 1..=120 {
            let s = step as f32 * 0.01;
            let phase = AnimationPhase::from_scroll(s);
            assert!(phase.text_fade + EPS >= previous.text_fade, "text fade at {s}");
            assert!(phase.zoom + EPS >= previous.zoom, "zoom at {s}");
            assert!(phase.dissolve + EPS >= previous.dissolve, "dissolve at {s}");
            assert!(phase.reassemble + EPS >= previous.reassemble, "reassemble at {s}");
            assert!((0.0..=DISSOLVE_CAP).contains(&phase.dissolve));
            previous = phase;
        }
    }

    #[test]
    fn reassembly_starts_after_full_page() {
        for step in 0..=100 {
            let s = step as f32 * 0.01;
            assert_eq!(AnimationPhase::from_scroll(s).reassemble, 0.0, "scroll {s}");
        }
        assert!((AnimationPhase::from_scroll(1.5).reassemble - 0.5).abs() < EPS);
        assert_eq!(AnimationPhase::from_scroll(2.0).reassemble, 1.0);
        assert_eq!(AnimationPhase::from_scroll(7.0).reassemble, 1.0);
    }

    #[test]
    fn band_midpoints() {
        let phase = AnimationPhase::from_scroll(0.75);
        assert_eq!(phase.text_fade, 1.0);
        assert!((phase.zoom - 0.3).abs() < EPS);
        assert!((phase.dissolve - 0.145).abs() < 1e-3);
        assert_eq!(phase.reassemble, 0.0);
        assert_eq!(phase.content_opacity(), 0.0);

        let phase = AnimationPhase::from_scroll(0.2);
        assert!((phase.content_opacity() - 0.4).abs() < EPS);
        assert_eq!(phase.zoom, 0.0);
    }

    #[test]
    fn negative_and_invalid_scroll_clamp_to_rest() {
        assert_eq!(AnimationPhase::from_scroll(-3.0), AnimationPhase::default());
        assert_eq!(AnimationPhase::from_scroll(f32::NAN), AnimationPhase::default());
    }

    #[test]
    fn scrolled_threshold() {
        assert!(!is_scrolled(0.1));
        assert!(is_scrolled(0.11));
    }
}
