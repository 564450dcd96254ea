//! JSON-RPC 2.0 bridge between the particle background and its host page.
//!
//! The background runs in an iframe or canvas owned by the host; both
//! directions go over `postMessage`.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Validate, emit event
//!        │ <────────────── Response (with ID) ─┤
//!        │                                     │
//!        ├─ Notification (no ID) ────────────> ├─ Validate, emit event
//!        │                                     │
//!        │ <──────────── Notification (no ID) ─┤
//! ```
//!
//! Host notifications act exactly like requests but get no response.
//!
//! ## Methods from the host
//!
//! - `set_scroll {offset_px, viewport_height_px}`: page scroll position
//! - `set_theme {theme}`: `"light"` or `"dark"`
//! - `close_panel {panel?}`: reassemble the words after a panel closes
//! - `set_active {active}`: pause or resume the animation
//! - `dispose`: tear the background down for good
//! - `get_state`: phase, theme, scatter and lifecycle snapshot
//!
//! ## Notifications to the host
//!
//! - `loading_progress {progress, stage}`
//! - `background_ready` / `background_unavailable {reason}`
//! - `open_panel {panel}`: a word was clicked and has scattered away
//! - `scroll_state {content_opacity, scrolled, progress}`
//! - `fps_update {fps}`
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 bidirectional communication system for host integration.
///
/// Handles request validation, notifications, and WASM message listeners.
pub mod web_rpc;
