use bevy::prelude::*;
use constants::camera::FOV_DEGREES;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::dynamics::{FrameInputs, screen_scale, update_particles};
use super::intro::IntroAnimation;
use super::particle_set::ParticleSet;
use super::scatter::TextScatter;
use crate::engine::camera::{BackgroundCamera, CameraFraming};
use crate::engine::director::scroll::ScrollState;
use crate::engine::director::theme::Theme;
use crate::engine::input::events::PanelOpened;
use crate::engine::interaction::pointer::PointerState;

/// Source of every random draw in the background: dispersion, scatter,
/// intro orbits and glyph sampling.
#[derive(Resource)]
pub struct ParticleRng(pub StdRng);

impl ParticleRng {
    /// Fixed seed when configured, wall clock otherwise.
    pub fn seeded(seed: Option<u64>) -> Self {
        Self(StdRng::seed_from_u64(seed.unwrap_or_else(wall_clock_seed)))
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::seeded(None)
    }
}

fn wall_clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    }
}

/// One frame of particle motion: lazy dispersion, scatter step, the
/// position and colour update, then the intro overwrite while it plays.
pub fn animate_particles(
    time: Res<Time>,
    scroll: Res<ScrollState>,
    pointer: Res<PointerState>,
    theme: Res<Theme>,
    framing: Res<CameraFraming>,
    mut scatter: ResMut<TextScatter>,
    mut set: ResMut<ParticleSet>,
    mut rng: ResMut<ParticleRng>,
    intro: Option<ResMut<IntroAnimation>>,
    cameras: Query<&Transform, With<BackgroundCamera>>,
    mut opened_events: EventWriter<PanelOpened>,
) {
    let phase = scroll.phase();
    if phase.dissolve > 0.0 && set.ensure_dispersion(&mut rng.0) {
        debug!("Dispersion vectors generated for {} particles", set.len());
    }

    if scatter.is_active() {
        if let Some(panel) = scatter.step() {
            info!("Scatter complete, opening {panel}");
            opened_events.write(PanelOpened(panel));
        }
    }

    let camera_z = cameras
        .iter()
        .next()
        .map(|transform| transform.translation.z)
        .unwrap_or(framing.rest.z);

    let inputs = FrameInputs {
        phase,
        time_secs: time.elapsed_secs(),
        pointer: pointer.position,
        pointer_velocity: pointer.velocity,
        screen_scale: screen_scale(camera_z, framing.anchor.z, FOV_DEGREES.to_radians()),
        theme_color: theme.text_color(),
        scatter: scatter.is_active().then(|| scatter.eased()),
    };
    update_particles(&mut set, &inputs);

    if let Some(mut intro) = intro {
        if intro.is_animating() {
            intro.extend_to(set.len());
            intro.apply(&mut set, time.elapsed_secs());
            if !intro.is_animating() {
                info!("Intro settled");
            }
        }
    }
}
