//! Scroll-driven camera framing and model tilt.

/// Camera tiers, zoom path and pointer tilt.
pub mod scroll_camera;

pub use scroll_camera::{
    BackgroundCamera, CameraFraming, ModelTilt, ParticleModel, update_model_tilt,
    update_scroll_camera,
};
