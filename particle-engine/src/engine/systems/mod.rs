//! Cross-cutting runtime systems.

/// Frame rate notifications for the host and the native FPS overlay.
pub mod fps_tracking;
