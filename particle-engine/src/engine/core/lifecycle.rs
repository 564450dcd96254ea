use bevy::prelude::*;

use super::app_state::AppState;
use crate::engine::camera::ParticleModel;
use crate::engine::input::events::{ActiveChanged, DisposeRequested};
use crate::engine::particles::intro::IntroAnimation;
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::text::layout::TextLayout;

/// Owner of the background's run state.
///
/// Started once the assets are ready, paused and resumed by the host,
/// and disposed for good. A disposed background never starts again.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundAnimation {
    started: bool,
    active: bool,
    disposed: bool,
}

impl Default for BackgroundAnimation {
    fn default() -> Self {
        Self {
            started: false,
            active: true,
            disposed: false,
        }
    }
}

impl BackgroundAnimation {
    /// Returns true only on the call that actually started it.
    pub fn start(&mut self) -> bool {
        if self.started || self.disposed {
            return false;
        }
        self.started = true;
        true
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns true only on the first call.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.active = false;
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Frame systems run only while this holds.
    pub fn is_running(&self) -> bool {
        self.started && self.active && !self.disposed
    }
}

/// Run condition for the per-frame animation systems.
pub fn animation_running(animation: Res<BackgroundAnimation>) -> bool {
    animation.is_running()
}

pub fn start_background_animation(mut animation: ResMut<BackgroundAnimation>) {
    if animation.start() {
        info!("Background animation started");
    }
}

pub fn apply_lifecycle_events(
    mut active_events: EventReader<ActiveChanged>,
    mut dispose_events: EventReader<DisposeRequested>,
    mut animation: ResMut<BackgroundAnimation>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for ActiveChanged(active) in active_events.read() {
        if animation.is_active() != *active {
            info!("Background {}", if *active { "resumed" } else { "paused" });
        }
        animation.set_active(*active);
    }

    if dispose_events.read().count() > 0 && animation.dispose() {
        info!("→ Dispose requested, transitioning to Disposed state");
        next_state.set(AppState::Disposed);
    }
}

/// Drop the model entity and every particle resource.
pub fn dispose_background(mut commands: Commands, models: Query<Entity, With<ParticleModel>>) {
    for entity in &models {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<ParticleSet>();
    commands.remove_resource::<IntroAnimation>();
    commands.remove_resource::<TextLayout>();
    info!("Background disposed");
}
