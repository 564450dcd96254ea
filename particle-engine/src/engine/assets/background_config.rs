use bevy::prelude::*;
use constants::particles::INTRO_DURATION_SECS;
use constants::camera::{BASE_ROTATION, MODEL_POSITION, MODEL_SCALE};
use constants::render_settings::{DEFAULT_FONT_PATH, DEFAULT_MODEL_PATH, PARTICLE_SIZE};
use constants::text::WORDS;
use serde::{Deserialize, Serialize};

/// Tunables read from `config/background.json`.
///
/// Every field has a default, so a partial file is valid and a missing one
/// behaves exactly like an empty object.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub model_path: String,
    pub font_path: String,
    pub model_position: [f32; 3],
    pub model_scale: f32,
    /// Euler XYZ, radians.
    pub base_rotation: [f32; 3],
    pub words: Vec<String>,
    pub particle_size: f32,
    pub intro_duration_secs: f32,
    /// Fixed seed for reproducible runs; wall clock when absent.
    pub random_seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            model_position: MODEL_POSITION,
            model_scale: MODEL_SCALE,
            base_rotation: BASE_ROTATION,
            words: WORDS.iter().map(|word| word.to_string()).collect(),
            particle_size: PARTICLE_SIZE,
            intro_duration_secs: INTRO_DURATION_SECS,
            random_seed: None,
        }
    }
}

impl BackgroundConfig {
    pub fn model_translation(&self) -> Vec3 {
        Vec3::from_array(self.model_position)
    }

    pub fn base_rotation(&self) -> Vec3 {
        Vec3::from_array(self.base_rotation)
    }

    /// Rest transform of the particle model.
    pub fn model_transform(&self) -> Transform {
        let [x, y, z] = self.base_rotation;
        Transform::from_translation(self.model_translation())
            .with_rotation(Quat::from_euler(EulerRot::XYZ, x, y, z))
            .with_scale(Vec3::splat(self.model_scale))
    }

    /// Words to form, capped at one per panel.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str).take(WORDS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: BackgroundConfig =
            serde_json::from_str(r#"{ "random_seed": 7, "model_scale": 2.0 }"#).unwrap();
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.model_scale, 2.0);
        assert_eq!(config.model_path, DEFAULT_MODEL_PATH);
        assert_eq!(config.words().collect::<Vec<_>>(), ["ABOUT", "SERVICES", "CONTACT"]);
    }

    #[test]
    fn model_transform_matches_rest_pose() {
        let transform = BackgroundConfig::default().model_transform();
        assert_eq!(transform.translation, Vec3::new(0.0, 29.0, -4.8));
        assert_eq!(transform.scale, Vec3::splat(3.0));
    }

    #[test]
    fn extra_words_are_ignored() {
        let config = BackgroundConfig {
            words: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            ..default()
        };
        assert_eq!(config.words().count(), 3);
    }
}
