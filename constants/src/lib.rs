//! Tuning constants shared by the particle engine and the asset tool.

/// Scroll bands, dissolve and breathing parameters.
pub mod animation;

/// Camera framing tiers and the fixed model transform.
pub mod camera;

/// Per-particle dynamics: repulsion, intro swirl and scatter.
pub mod particles;

/// Particle sprite size and default asset locations.
pub mod render_settings;

/// Glyph bitmap dimensions and text scale tiers.
pub mod text;
