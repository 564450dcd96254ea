use bevy::prelude::*;

use super::phases::AnimationPhase;

/// Host scroll position and the viewport height it is measured against.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset_px: f32,
    pub viewport_height_px: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset_px: 0.0,
            viewport_height_px: 1.0,
        }
    }
}

impl ScrollState {
    pub fn new(offset_px: f32, viewport_height_px: f32) -> Self {
        let mut state = Self::default();
        state.set(offset_px, viewport_height_px);
        state
    }

    /// Scroll offset in viewport heights. Zero for an empty viewport.
    pub fn progress(&self) -> f32 {
        if self.viewport_height_px <= 0.0 {
            return 0.0;
        }
        self.offset_px / self.viewport_height_px
    }

    pub fn phase(&self) -> AnimationPhase {
        AnimationPhase::from_scroll(self.progress())
    }

    pub fn set(&mut self, offset_px: f32, viewport_height_px: f32) {
        self.offset_px = offset_px.max(0.0);
        self.viewport_height_px = viewport_height_px.max(0.0);
    }

    /// Rescale the offset so the relative progress survives a height change.
    pub fn resize(&mut self, viewport_height_px: f32) {
        let progress = self.progress();
        self.viewport_height_px = viewport_height_px.max(0.0);
        self.offset_px = progress * self.viewport_height_px;
    }

    /// Scroll by a pixel delta, clamped at the top of the page.
    pub fn scroll_by(&mut self, delta_px: f32) {
        self.offset_px = (self.offset_px + delta_px).max(0.0);
    }
}
