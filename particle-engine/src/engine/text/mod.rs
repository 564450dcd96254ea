//! Word targets for the reassembled text.
//!
//! Words are rasterised into greyscale bitmaps, foreground pixels are
//! rejection-sampled, and the accepted pixels are laid out in model space
//! as per-particle text targets.

/// Greyscale canvas with foreground tests and coverage.
pub mod bitmap;

/// Converts layout pixels into model-space targets at the viewport's scale tier.
pub mod layout;

/// Font shaping and glyph rasterisation onto fixed-size bitmaps.
pub mod rasterizer;

/// Coverage-weighted rejection sampling of word pixels.
pub mod sampler;

/// Startup system that builds the text targets once the font has loaded.
pub mod targets;
