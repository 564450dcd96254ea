//! Asset loading and initialisation systems for the particle background.
//!
//! Manages the loading pipeline from configuration through model and font
//! loads to particle creation, with progress tracking for the host.

/// Config, model and font handles plus load-state polling.
///
/// Falls back to default configuration and reports asset failures once.
pub mod asset_loader;

/// Particle set, text targets and mesh entity creation.
///
/// Runs once both the point cloud and the font are available.
pub mod particle_creator;

/// Loading progress tracking resource for state transitions.
pub mod progress;
