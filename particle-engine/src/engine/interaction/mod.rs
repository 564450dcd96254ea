//! Pointer and click handling.

/// Click gating by phase and scatter state.
pub mod click;

/// Panels opened by clicking a word.
pub mod panel;

/// Ray picking against text particles.
pub mod picking;

/// Normalised pointer position and velocity.
pub mod pointer;

/// Systems translating input events into pointer, tilt and scatter state.
pub mod systems;
