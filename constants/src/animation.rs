/// Scroll band over which page content fades out.
pub const TEXT_FADE_BAND: (f32, f32) = (0.0, 0.4);

/// Scroll band over which the camera moves from rest to the zoomed framing.
pub const ZOOM_BAND: (f32, f32) = (0.4, 0.7);

/// Scroll band over which the model dissolves.
pub const DISSOLVE_BAND: (f32, f32) = (0.7, 1.0);

/// Scroll band over which dissolved particles reassemble into words.
pub const REASSEMBLE_BAND: (f32, f32) = (1.0, 2.0);

/// Camera lerp factor reached at the end of the zoom band.
pub const ZOOM_MAX: f32 = 0.3;

/// Dissolve progress is capped here rather than at 1.
pub const DISSOLVE_CAP: f32 = 0.87;

/// Content opacity falls as `1 - CONTENT_FADE_RATE * text_fade`.
pub const CONTENT_FADE_RATE: f32 = 1.2;

/// Scroll progress past which the page counts as scrolled.
pub const SCROLLED_THRESHOLD: f32 = 0.1;

pub const DISPERSE_SPEED: f32 = 2.0;
pub const DISPERSE_FACTOR: f32 = 0.17;

/// Dispersion vector speed range, world units.
pub const DISPERSION_SPEED_RANGE: (f32, f32) = (50.0, 150.0);

/// Breathing amplitude at zero dissolve.
pub const BREATHING_AMPLITUDE: f32 = 0.03;

/// Per-index phase offset of the breathing wave.
pub const BREATHING_PHASE_STEP: f32 = 0.1;

/// Velocity multiplier applied every frame.
pub const VELOCITY_DECAY: f32 = 0.9;
