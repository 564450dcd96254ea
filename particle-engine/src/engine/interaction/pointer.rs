use bevy::prelude::*;

/// Last pointer position in normalized device coordinates and the delta
/// between the last two moves.
///
/// The delta is kept until the next move, so a resting pointer keeps
/// nudging nearby particles the way it last moved.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl PointerState {
    /// Record a move given in viewport pixels, origin top-left.
    pub fn move_to(&mut self, screen_px: Vec2, viewport_px: Vec2) {
        let next = normalize_pointer(screen_px, viewport_px);
        self.velocity = next - self.position;
        self.position = next;
    }
}

/// Viewport pixels to normalized device coordinates with +y up.
pub fn normalize_pointer(screen_px: Vec2, viewport_px: Vec2) -> Vec2 {
    if viewport_px.x <= 0.0 || viewport_px.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        screen_px.x / viewport_px.x * 2.0 - 1.0,
        -(screen_px.y / viewport_px.y * 2.0 - 1.0),
    )
}
