use bevy::prelude::*;

use crate::engine::director::theme::Theme;
use crate::engine::interaction::panel::PanelId;

/// Pointer or touch moved, in viewport pixels with the origin top-left.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerMoved {
    pub position: Vec2,
    pub viewport: Vec2,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

/// Host page scroll offset and the viewport height it is measured against.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ScrollChanged {
    pub offset_px: f32,
    pub viewport_height_px: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged(pub Theme);

/// Click or tap on the canvas, in viewport pixels.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CanvasClicked {
    pub position: Vec2,
}

/// The host closed a content panel; the words should come back.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelCloseRequested(pub Option<PanelId>);

/// Pause or resume per-frame animation without tearing anything down.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChanged(pub bool);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisposeRequested;

/// Scatter-out finished; the host should show this panel.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOpened(pub PanelId);
