use bevy::prelude::*;

use crate::engine::error::BackgroundError;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_loaded: bool,
    pub model_loaded: bool,
    pub font_loaded: bool,
    pub particles_created: bool,
    pub failure: Option<BackgroundError>,
}

impl LoadingProgress {
    /// Completed share of the loading steps.
    pub fn fraction(&self) -> f32 {
        let steps = [
            self.config_loaded,
            self.model_loaded,
            self.font_loaded,
            self.particles_created,
        ];
        steps.iter().filter(|done| **done).count() as f32 / steps.len() as f32
    }

    pub fn stage(&self) -> &'static str {
        if self.failure.is_some() {
            "failed"
        } else if self.particles_created {
            "ready"
        } else if self.model_loaded && self.font_loaded {
            "building"
        } else if self.config_loaded {
            "assets"
        } else {
            "config"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_counts_steps() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.stage(), "config");

        progress.config_loaded = true;
        progress.model_loaded = true;
        assert_eq!(progress.fraction(), 0.5);
        assert_eq!(progress.stage(), "assets");

        progress.font_loaded = true;
        assert_eq!(progress.stage(), "building");
        progress.particles_created = true;
        assert_eq!(progress.fraction(), 1.0);
        assert_eq!(progress.stage(), "ready");
    }
}
