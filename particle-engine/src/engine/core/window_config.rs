use bevy::prelude::*;
use bevy::window::PresentMode;

/// Transparent window drawn behind the host page. On wasm it binds to the
/// `#bevy` canvas and follows its parent's size.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Particle Background".into(),
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
