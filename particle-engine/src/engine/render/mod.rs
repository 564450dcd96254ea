//! Particle rendering.
//!
//! The particle store is copied into a quad-per-particle mesh each frame
//! and drawn with a round-sprite material.

/// Round sprite material and its vertex layout.
pub mod particle_material;

/// Mesh construction and per-frame buffer upload.
pub mod particle_mesh;
