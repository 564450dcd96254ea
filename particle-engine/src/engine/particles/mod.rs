//! Particle store and per-frame particle motion.
//!
//! The store owns every per-particle array. Dynamics, the scatter state
//! machine and the intro swirl each write into it; the render module
//! copies the result into the GPU mesh.

/// Per-frame position and colour update.
pub mod dynamics;

/// Orbital swirl-in that plays once after the model appears.
pub mod intro;

/// Original and current per-particle arrays plus lazily drawn random vectors.
pub mod particle_set;

/// Click-triggered scatter-out and scatter-in of the words.
pub mod scatter;

/// Bevy systems driving the particle update each frame.
pub mod systems;
