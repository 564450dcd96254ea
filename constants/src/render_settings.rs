/// World-space diameter of a particle sprite.
pub const PARTICLE_SIZE: f32 = 0.5;

pub const CONFIG_PATH: &str = "config/background.json";
pub const DEFAULT_MODEL_PATH: &str = "models/orchid.ply";
pub const DEFAULT_FONT_PATH: &str = "fonts/Inter-Bold.ttf";
pub const PARTICLE_SHADER_PATH: &str = "shaders/particles.wgsl";

/// Seconds between loading progress notifications.
pub const PROGRESS_NOTIFY_INTERVAL: f32 = 0.25;

/// Point budget the asset tool decimates to unless told otherwise.
pub const DEFAULT_MAX_POINTS: usize = 150_000;
