use bevy::prelude::*;
use constants::particles::PICK_THRESHOLD;

use super::click::click_allowed;
use super::picking::pick_text_particle;
use super::pointer::PointerState;
use crate::engine::camera::{BackgroundCamera, ModelTilt, ParticleModel};
use crate::engine::director::scroll::ScrollState;
use crate::engine::input::events::{CanvasClicked, PanelCloseRequested, PointerMoved};
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::particles::scatter::TextScatter;
use crate::engine::particles::systems::ParticleRng;

/// Pointer moves update the normalised pointer and retarget the tilt.
pub fn track_pointer(
    mut events: EventReader<PointerMoved>,
    scroll: Res<ScrollState>,
    mut pointer: ResMut<PointerState>,
    mut tilt: ResMut<ModelTilt>,
) {
    let dissolve = scroll.phase().dissolve;
    for event in events.read() {
        pointer.move_to(event.position, event.viewport);
        tilt.on_pointer_move(pointer.position, dissolve);
    }
}

/// Pick a word under the click and scatter it away. Clicks only count
/// once the model is fully dissolved and the words fully formed.
pub fn handle_canvas_clicks(
    mut events: EventReader<CanvasClicked>,
    scroll: Res<ScrollState>,
    mut scatter: ResMut<TextScatter>,
    mut rng: ResMut<ParticleRng>,
    set: Option<ResMut<ParticleSet>>,
    cameras: Query<(&Camera, &GlobalTransform), With<BackgroundCamera>>,
    models: Query<&GlobalTransform, With<ParticleModel>>,
) {
    let (Some(mut set), Ok((camera, camera_transform)), Ok(model_transform)) =
        (set, cameras.single(), models.single())
    else {
        events.clear();
        return;
    };

    for event in events.read() {
        if !click_allowed(&scroll.phase(), scatter.is_active()) {
            continue;
        }

        let ray = match camera.viewport_to_world(camera_transform, event.position) {
            Ok(ray) => ray,
            Err(error) => {
                debug!("Click could not be projected: {error:?}");
                continue;
            }
        };

        let Some(hit) = pick_text_particle(
            ray.origin,
            *ray.direction,
            model_transform,
            &set,
            PICK_THRESHOLD,
        ) else {
            continue;
        };

        if set.ensure_scatter(&mut rng.0) {
            debug!("Scatter vectors generated for {} particles", set.len());
        }
        info!("Clicked particle {} of {}, scattering", hit.index, hit.panel);
        scatter.scatter_out(hit.panel);
    }
}

/// A closed panel pulls the words back together.
pub fn handle_panel_close(
    mut events: EventReader<PanelCloseRequested>,
    mut scatter: ResMut<TextScatter>,
) {
    for PanelCloseRequested(panel) in events.read() {
        match panel {
            Some(panel) => info!("Panel {panel} closed, reassembling"),
            None => info!("Panel closed, reassembling"),
        }
        scatter.scatter_in();
    }
}
