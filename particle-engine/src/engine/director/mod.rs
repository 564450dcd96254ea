//! Scroll-driven animation direction.
//!
//! Turns the host page's scroll offset into phase values and keeps the
//! colour theme the words are painted with.

/// Phase ramps derived from scroll progress.
pub mod phases;

/// Scroll offset and viewport height as reported by the host.
pub mod scroll;

/// Systems applying host scroll and theme events.
pub mod systems;

/// Light and dark colour themes.
pub mod theme;
