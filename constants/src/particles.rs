/// Screen-space radius (normalized device units) of pointer repulsion.
pub const REPULSION_RADIUS: f32 = 0.4;
pub const REPULSION_STRENGTH: f32 = 0.1;
pub const REPULSION_VELOCITY_INFLUENCE: f32 = 1.5;
pub const REPULSION_RADIAL_INFLUENCE: f32 = 0.5;

/// Words need at least this many particles per letter.
pub const PARTICLES_PER_LETTER: usize = 300;

/// Scatter vector radial and outward speed ranges.
pub const SCATTER_RADIAL_RANGE: (f32, f32) = (20.0, 35.0);
pub const SCATTER_OUTWARD_RANGE: (f32, f32) = (35.0, 60.0);

/// Scatter progress advanced per frame.
pub const SCATTER_STEP: f32 = 0.015;

/// Scale applied to scatter vectors at full progress.
pub const SCATTER_SPEED: f32 = 0.6;

pub const INTRO_DURATION_SECS: f32 = 3.0;
pub const INTRO_SPREAD: f32 = 200.0;
pub const INTRO_ORBIT_SPEED_RANGE: (f32, f32) = (0.5, 2.0);
pub const INTRO_ORBIT_RADIUS_RANGE: (f32, f32) = (50.0, 200.0);
pub const INTRO_SPIRAL_TIGHTNESS_RANGE: (f32, f32) = (0.15, 0.35);
pub const INTRO_SPIRAL_DEPTH: f32 = 0.2;
pub const INTRO_FLOW_AMPLITUDE: f32 = 5.0;

/// World-space distance from a click ray within which a particle counts as hit.
pub const PICK_THRESHOLD: f32 = 1.0;
