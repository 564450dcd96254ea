use bevy::prelude::*;
use constants::animation::DISSOLVE_CAP;
use constants::camera::{
    BASE_ROTATION, CAMERA_TIERS, MODEL_POSITION, PORTRAIT_ADJUST, REST_Z, TILT_FLOOR, TILT_SMOOTHING,
    TILT_SPEED, TILT_STRENGTH, ULTRAWIDE_ADJUST, ULTRAWIDE_ASPECT,
};

use crate::engine::director::phases::AnimationPhase;
use crate::engine::director::scroll::ScrollState;

/// Marker for the single perspective camera looking at the model.
#[derive(Component)]
pub struct BackgroundCamera;

/// Marker for the point cloud mesh entity.
#[derive(Component)]
pub struct ParticleModel;

/// Rest and zoomed camera positions for the current viewport.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub rest: Vec3,
    pub zoomed: Vec3,
    /// Point the camera keeps looking at.
    pub anchor: Vec3,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self::for_viewport(1920.0, 1080.0)
    }
}

impl CameraFraming {
    /// Pick the width tier, then adjust for portrait or ultrawide aspect.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let tier = CAMERA_TIERS
            .iter()
            .find(|tier| width <= tier.max_width)
            .or(CAMERA_TIERS.last())
            .copied();

        let (mut rest_y, mut rest_z, mut zoom_y, zoom_z) = match tier {
            Some(tier) => (tier.rest_y, REST_Z, tier.zoom_y, tier.zoom_z),
            None => (-60.0, REST_Z, 29.0, -4.7),
        };

        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let adjust = if aspect < 1.0 {
            Some(PORTRAIT_ADJUST)
        } else if aspect > ULTRAWIDE_ASPECT {
            Some(ULTRAWIDE_ADJUST)
        } else {
            None
        };
        if let Some([y, z, zy]) = adjust {
            rest_y *= y;
            rest_z *= z;
            zoom_y *= zy;
        }

        Self {
            rest: Vec3::new(0.0, rest_y, rest_z),
            zoomed: Vec3::new(0.0, zoom_y, zoom_z),
            anchor: model_anchor(),
        }
    }

    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn position(&self, zoom: f32) -> Vec3 {
        self.rest.lerp(self.zoomed, zoom)
    }

    /// Camera transform for a zoom factor, always aimed at the model anchor.
    pub fn transform(&self, zoom: f32) -> Transform {
        Transform::from_translation(self.position(zoom)).looking_at(self.anchor, Vec3::Y)
    }
}

pub fn model_anchor() -> Vec3 {
    Vec3::from_array(MODEL_POSITION)
}

/// Pointer-driven tilt of the model around its rest rotation.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ModelTilt {
    pub base: Vec3,
    pub target: Vec3,
    pub current: Vec3,
}

impl Default for ModelTilt {
    fn default() -> Self {
        Self::new(Vec3::from_array(BASE_ROTATION))
    }
}

impl ModelTilt {
    pub fn new(base: Vec3) -> Self {
        Self {
            base,
            target: base,
            current: base,
        }
    }

    /// Retarget from a pointer move. Tilt fades to 5% as the model dissolves
    /// and the immediate catch-up slows with it.
    pub fn on_pointer_move(&mut self, pointer: Vec2, dissolve: f32) {
        let fraction = dissolve / DISSOLVE_CAP;
        let reduction = TILT_FLOOR + (1.0 - TILT_FLOOR) * (1.0 - fraction);
        self.target.x = self.base.x + pointer.y * TILT_STRENGTH * reduction;
        self.target.y = self.base.y + pointer.x * TILT_STRENGTH * reduction;

        let speed = TILT_SPEED * (1.0 - fraction * 0.9);
        self.current.x += (self.target.x - self.current.x) * speed;
        self.current.y += (self.target.y - self.current.y) * speed;
    }

    /// Per-frame smoothing toward the target.
    pub fn smooth(&mut self, dissolve: f32) {
        if dissolve < 1.0 {
            self.current.x += (self.target.x - self.current.x) * TILT_SMOOTHING;
            self.current.y += (self.target.y - self.current.y) * TILT_SMOOTHING;
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.current.x, self.current.y, self.current.z)
    }
}

/// Move the camera along the zoom path for the current scroll.
pub fn update_scroll_camera(
    scroll: Res<ScrollState>,
    framing: Res<CameraFraming>,
    mut cameras: Query<&mut Transform, With<BackgroundCamera>>,
) {
    let phase = AnimationPhase::from_scroll(scroll.progress());
    for mut transform in &mut cameras {
        *transform = framing.transform(phase.zoom);
    }
}

/// Apply the smoothed tilt to the model each frame.
pub fn update_model_tilt(
    scroll: Res<ScrollState>,
    mut tilt: ResMut<ModelTilt>,
    mut models: Query<&mut Transform, With<ParticleModel>>,
) {
    tilt.smooth(scroll.phase().dissolve);
    for mut transform in &mut models {
        transform.rotation = tilt.rotation();
    }
}
