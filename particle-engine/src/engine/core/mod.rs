//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the particle material, asset loaders, the
/// host bridge and platform-specific configurations.
pub mod app_setup;

/// Application state machine and loading transitions.
///
/// Manages states from initial loading through model creation to runtime,
/// plus the unavailable and disposed end states.
pub mod app_state;

/// Start, pause, resume and dispose of the background.
pub mod lifecycle;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
