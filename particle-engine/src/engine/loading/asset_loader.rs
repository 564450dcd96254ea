use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;
use constants::render_settings::{CONFIG_PATH, PROGRESS_NOTIFY_INTERVAL};

use crate::engine::assets::background_config::BackgroundConfig;
use crate::engine::assets::point_cloud::PointCloudData;
use crate::engine::camera::{CameraFraming, ModelTilt};
use crate::engine::error::BackgroundError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::particles::systems::ParticleRng;
use crate::rpc::web_rpc::WebRpcInterface;

/// Handles for the three assets the background needs.
#[derive(Resource, Default)]
pub struct BackgroundAssets {
    pub config: Option<Handle<BackgroundConfig>>,
    pub model: Option<Handle<PointCloudData>>,
    pub font: Option<Handle<Font>>,
}

// Start the loading process
pub fn start_loading(mut handles: ResMut<BackgroundAssets>, asset_server: Res<AssetServer>) {
    handles.config = Some(asset_server.load(CONFIG_PATH));
}

/// Apply the config once it resolves, falling back to defaults when the
/// file is missing, then queue the model and font.
pub fn load_config_system(
    mut loading_progress: ResMut<LoadingProgress>,
    mut handles: ResMut<BackgroundAssets>,
    mut framing: ResMut<CameraFraming>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<BackgroundConfig>>,
) {
    if loading_progress.config_loaded {
        return;
    }
    let Some(handle) = handles.config.clone() else {
        return;
    };

    let config = match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => configs.get(&handle).cloned().unwrap_or_default(),
        Some(LoadState::Failed(error)) => {
            warn!("Config '{CONFIG_PATH}' unavailable ({error}), using defaults");
            BackgroundConfig::default()
        }
        _ => return,
    };

    info!(
        "✓ Config loaded, model '{}' font '{}'",
        config.model_path, config.font_path
    );
    handles.model = Some(asset_server.load(config.model_path.clone()));
    handles.font = Some(asset_server.load(config.font_path.clone()));

    framing.anchor = config.model_translation();
    commands.insert_resource(ModelTilt::new(config.base_rotation()));
    commands.insert_resource(ParticleRng::seeded(config.random_seed));
    commands.insert_resource(config);
    loading_progress.config_loaded = true;
}

/// Watch model and font loads. A failure is recorded once and never retried.
pub fn check_asset_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    handles: Res<BackgroundAssets>,
    config: Option<Res<BackgroundConfig>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.failure.is_some() {
        return;
    }
    let Some(config) = config else {
        return;
    };

    if !loading_progress.model_loaded {
        if let Some(handle) = &handles.model {
            match poll_load(&asset_server, handle.id().untyped(), &config.model_path) {
                Ok(true) => {
                    info!("✓ Point cloud loaded");
                    loading_progress.model_loaded = true;
                }
                Ok(false) => {}
                Err(error) => loading_progress.failure = Some(error),
            }
        }
    }

    if !loading_progress.font_loaded && loading_progress.failure.is_none() {
        if let Some(handle) = &handles.font {
            match poll_load(&asset_server, handle.id().untyped(), &config.font_path) {
                Ok(true) => {
                    info!("✓ Font loaded");
                    loading_progress.font_loaded = true;
                }
                Ok(false) => {}
                Err(error) => loading_progress.failure = Some(error),
            }
        }
    }
}

fn poll_load(
    asset_server: &AssetServer,
    id: UntypedAssetId,
    path: &str,
) -> Result<bool, BackgroundError> {
    match asset_server.get_load_state(id) {
        Some(LoadState::Loaded) => Ok(true),
        Some(LoadState::Failed(error)) => {
            let error = BackgroundError::AssetLoad {
                path: path.to_string(),
                reason: error.to_string(),
            };
            error!("{error}");
            Err(error)
        }
        _ => Ok(false),
    }
}

/// Push loading progress to the host at a fixed interval.
pub fn notify_loading_progress(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_send_time: Local<Option<f32>>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if let Some(last) = *last_send_time {
        if current_time - last < PROGRESS_NOTIFY_INTERVAL {
            return;
        }
    }

    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "progress": loading_progress.fraction(),
            "stage": loading_progress.stage(),
        }),
    );
    *last_send_time = Some(current_time);
}
