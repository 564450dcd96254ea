use std::collections::HashMap;

use bevy::input::ButtonState;
use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use super::events::{CanvasClicked, PointerMoved, ScrollChanged, ViewportResized};
use crate::engine::director::scroll::ScrollState;

/// Pixels per wheel line when the platform reports lines.
const WHEEL_LINE_PX: f32 = 40.0;

/// Furthest a touch may travel between start and end and still count as a tap.
pub const TAP_SLOP_PX: f32 = 10.0;

fn window_size(window: &Window) -> Vec2 {
    Vec2::new(window.width(), window.height())
}

/// Mouse moves and touch start/move both count as pointer moves.
pub fn forward_pointer_moves(
    mut cursor_events: EventReader<CursorMoved>,
    mut touch_events: EventReader<TouchInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer_events: EventWriter<PointerMoved>,
) {
    let Ok(window) = windows.single() else {
        cursor_events.clear();
        touch_events.clear();
        return;
    };
    let viewport = window_size(window);

    for event in cursor_events.read() {
        pointer_events.write(PointerMoved {
            position: event.position,
            viewport,
        });
    }
    for touch in touch_events.read() {
        if matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved) {
            pointer_events.write(PointerMoved {
                position: touch.position,
                viewport,
            });
        }
    }
}

/// Left presses at the cursor, and touches lifted within a few pixels of
/// where they started, become canvas clicks. Longer drags are scrolls.
pub fn forward_clicks(
    mut button_events: EventReader<MouseButtonInput>,
    mut touch_events: EventReader<TouchInput>,
    mut touch_starts: Local<HashMap<u64, Vec2>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut click_events: EventWriter<CanvasClicked>,
) {
    for touch in touch_events.read() {
        match touch.phase {
            TouchPhase::Started => {
                touch_starts.insert(touch.id, touch.position);
            }
            TouchPhase::Ended => {
                let started = touch_starts.remove(&touch.id);
                if started.is_some_and(|start| start.distance(touch.position) <= TAP_SLOP_PX) {
                    click_events.write(CanvasClicked {
                        position: touch.position,
                    });
                }
            }
            TouchPhase::Canceled => {
                touch_starts.remove(&touch.id);
            }
            TouchPhase::Moved => {}
        }
    }

    let Ok(window) = windows.single() else {
        button_events.clear();
        return;
    };

    for event in button_events.read() {
        if event.button != MouseButton::Left || event.state != ButtonState::Pressed {
            continue;
        }
        if let Some(position) = window.cursor_position() {
            click_events.write(CanvasClicked { position });
        }
    }
}

pub fn forward_resizes(
    mut resize_events: EventReader<WindowResized>,
    mut viewport_events: EventWriter<ViewportResized>,
) {
    // Only the last size of a burst matters.
    if let Some(event) = resize_events.read().last() {
        viewport_events.write(ViewportResized {
            width: event.width,
            height: event.height,
        });
    }
}

/// Native builds have no host page, so the wheel stands in for its scroll.
pub fn forward_wheel_as_scroll(
    mut wheel_events: EventReader<MouseWheel>,
    scroll: Res<ScrollState>,
    mut scroll_events: EventWriter<ScrollChanged>,
) {
    let delta: f32 = wheel_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => -event.y * WHEEL_LINE_PX,
            MouseScrollUnit::Pixel => -event.y,
        })
        .sum();
    if delta == 0.0 {
        return;
    }

    let mut next = *scroll;
    next.scroll_by(delta);
    scroll_events.write(ScrollChanged {
        offset_px: next.offset_px,
        viewport_height_px: next.viewport_height_px,
    });
}

/// Desktop stand-ins for host signals: Escape closes the open panel and
/// T flips the theme.
#[cfg(not(target_arch = "wasm32"))]
pub fn native_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    theme: Res<crate::engine::director::theme::Theme>,
    mut close_events: EventWriter<super::events::PanelCloseRequested>,
    mut theme_events: EventWriter<super::events::ThemeChanged>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        close_events.write(super::events::PanelCloseRequested(None));
    }
    if keys.just_pressed(KeyCode::KeyT) {
        theme_events.write(super::events::ThemeChanged(theme.toggled()));
    }
}
