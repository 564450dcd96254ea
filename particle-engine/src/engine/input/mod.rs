//! Input port of the background.
//!
//! Every outside signal arrives as a Bevy event. Window systems here and
//! the JSON-RPC bridge are the only producers; the frame systems consume
//! them once per frame.

/// Event types for host and window signals.
pub mod events;

/// Translates window, mouse and touch input into background events.
pub mod window_input;
