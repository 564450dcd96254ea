/// Words formed during reassembly, top to bottom.
pub const WORDS: [&str; 3] = ["ABOUT", "SERVICES", "CONTACT"];

pub const BITMAP_WIDTH: u32 = 1024;
pub const BITMAP_HEIGHT: u32 = 256;
pub const FONT_SIZE_PX: f32 = 180.0;

/// Luminance above which a pixel is foreground.
pub const LUMINANCE_THRESHOLD: u8 = 128;

/// Target points per word = `floor(coverage * particles * DENSITY)`.
pub const SAMPLE_DENSITY: f32 = 2.0;

/// Rejection sampling gives up after `target * MAX_ATTEMPT_FACTOR` draws.
pub const MAX_ATTEMPT_FACTOR: usize = 4;

/// Vertical spacing between word rows, world units.
pub const ROW_SPACING: f32 = 5.0;

/// Depth of the text plane in model space.
pub const TEXT_DEPTH: f32 = 5.0;

/// (max viewport width, world units per bitmap pixel).
pub const SCALE_TIERS: &[(f32, f32)] = &[
    (360.0, 0.023),
    (500.0, 0.023),
    (768.0, 0.02),
    (1024.0, 0.018),
    (f32::INFINITY, 0.015),
];
