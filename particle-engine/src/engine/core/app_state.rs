use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    AssetsLoaded,
    Running,
    /// An asset failed; the page carries on without the background.
    Unavailable,
    Disposed,
}

#[derive(Component)]
pub struct FpsText;

// Transition to AssetsLoaded once the particle model exists
pub fn transition_to_assets_loaded(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.particles_created {
        info!("→ Transitioning to AssetsLoaded state");
        next_state.set(AppState::AssetsLoaded);
    }
}

// Give up on the background after any load failure
pub fn transition_to_unavailable(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(failure) = &loading_progress.failure else {
        return;
    };
    error!("→ Background unavailable: {failure}");
    rpc_interface.send_notification(
        "background_unavailable",
        serde_json::json!({ "reason": failure.to_string() }),
    );
    next_state.set(AppState::Unavailable);
}

// Final transition to running state
pub fn transition_to_running(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    info!("→ Background ready, transitioning to Running state");
    rpc_interface.send_notification("background_ready", serde_json::json!({}));
    next_state.set(AppState::Running);
}
