/// Vertical field of view, degrees.
pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

/// World offset of the recentred model.
pub const MODEL_POSITION: [f32; 3] = [0.0, 29.0, -4.8];
pub const MODEL_SCALE: f32 = 3.0;

/// Model rest rotation (x, y, z euler radians).
pub const BASE_ROTATION: [f32; 3] = [1.529, 6.4, 0.0046];

/// Camera z at rest for every tier.
pub const REST_Z: f32 = 5.0;

/// Camera framing for one viewport width tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTier {
    pub max_width: f32,
    pub rest_y: f32,
    pub zoom_y: f32,
    pub zoom_z: f32,
}

/// Ordered by `max_width`; the last entry catches everything wider.
pub const CAMERA_TIERS: &[CameraTier] = &[
    CameraTier { max_width: 360.0, rest_y: -180.0, zoom_y: 40.0, zoom_z: -6.0 },
    CameraTier { max_width: 500.0, rest_y: -160.0, zoom_y: 40.0, zoom_z: -6.0 },
    CameraTier { max_width: 768.0, rest_y: -120.0, zoom_y: 40.0, zoom_z: -6.0 },
    CameraTier { max_width: 1024.0, rest_y: -80.0, zoom_y: 35.0, zoom_z: -5.5 },
    CameraTier { max_width: 1440.0, rest_y: -60.0, zoom_y: 30.0, zoom_z: -5.0 },
    CameraTier { max_width: f32::INFINITY, rest_y: -60.0, zoom_y: 29.0, zoom_z: -4.7 },
];

/// Portrait viewports (aspect < 1): rest y, rest z and zoom y multipliers.
pub const PORTRAIT_ADJUST: [f32; 3] = [0.8, 1.2, 0.9];

/// Ultrawide viewports (aspect > 2).
pub const ULTRAWIDE_ADJUST: [f32; 3] = [1.2, 0.8, 1.1];
pub const ULTRAWIDE_ASPECT: f32 = 2.0;

/// Tilt applied per unit of normalized pointer offset.
pub const TILT_STRENGTH: f32 = 0.5;
/// Residual tilt fraction left at full dissolve.
pub const TILT_FLOOR: f32 = 0.05;
pub const TILT_SPEED: f32 = 0.1;
pub const TILT_SMOOTHING: f32 = 0.05;
