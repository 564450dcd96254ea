// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::PrimaryWindow;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{FAR, FOV_DEGREES, NEAR};

// Crate engine modules
use crate::engine::assets::background_config::BackgroundConfig;
use crate::engine::assets::point_cloud::{PointCloudData, PointCloudLoader};
use crate::engine::camera::{
    BackgroundCamera, CameraFraming, ModelTilt, update_model_tilt, update_scroll_camera,
};
use crate::engine::core::app_state::{
    AppState, FpsText, transition_to_assets_loaded, transition_to_running,
    transition_to_unavailable,
};
use crate::engine::core::lifecycle::{
    BackgroundAnimation, animation_running, apply_lifecycle_events, dispose_background,
    start_background_animation,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::director::scroll::ScrollState;
use crate::engine::director::systems::{
    apply_scroll_events, apply_theme_events, apply_viewport_resize, notify_scroll_state,
};
use crate::engine::director::theme::Theme;
use crate::engine::input::events::{
    ActiveChanged, CanvasClicked, DisposeRequested, PanelCloseRequested, PanelOpened,
    PointerMoved, ScrollChanged, ThemeChanged, ViewportResized,
};
use crate::engine::input::window_input::{forward_clicks, forward_pointer_moves, forward_resizes};
use crate::engine::interaction::pointer::PointerState;
use crate::engine::interaction::systems::{
    handle_canvas_clicks, handle_panel_close, track_pointer,
};
use crate::engine::loading::asset_loader::{
    BackgroundAssets, check_asset_loading, load_config_system, notify_loading_progress,
    start_loading,
};
use crate::engine::loading::particle_creator::create_particles_when_ready;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::particles::scatter::TextScatter;
use crate::engine::particles::systems::{ParticleRng, animate_particles};
use crate::engine::render::particle_material::ParticleMaterial;
use crate::engine::render::particle_mesh::upload_particle_mesh;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::input::window_input::{forward_wheel_as_scroll, native_shortcuts};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<ParticleMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers BackgroundConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<BackgroundConfig>::new(&["json"]))
        .init_asset::<PointCloudData>()
        .init_asset_loader::<PointCloudLoader>()
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(Color::NONE));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<BackgroundAssets>()
        .init_resource::<BackgroundAnimation>()
        .init_resource::<ScrollState>()
        .init_resource::<Theme>()
        .init_resource::<PointerState>()
        .init_resource::<TextScatter>()
        .init_resource::<CameraFraming>()
        .init_resource::<ModelTilt>()
        .init_resource::<ParticleRng>()
        .add_event::<PointerMoved>()
        .add_event::<ViewportResized>()
        .add_event::<ScrollChanged>()
        .add_event::<ThemeChanged>()
        .add_event::<CanvasClicked>()
        .add_event::<PanelCloseRequested>()
        .add_event::<ActiveChanged>()
        .add_event::<DisposeRequested>()
        .add_event::<PanelOpened>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_config_system,
                check_asset_loading,
                create_particles_when_ready,
                notify_loading_progress,
                transition_to_unavailable,
                transition_to_assets_loaded,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (start_background_animation, transition_to_running)
                .chain()
                .run_if(in_state(AppState::AssetsLoaded)),
        )
        .add_systems(OnEnter(AppState::Disposed), dispose_background);

    // Host and window signals are applied in every state so the background
    // comes up already matching the page.
    app.add_systems(
        Update,
        (
            forward_pointer_moves,
            forward_clicks,
            forward_resizes,
            apply_scroll_events,
            apply_theme_events,
            apply_viewport_resize,
            track_pointer,
            handle_panel_close,
            apply_lifecycle_events,
            notify_scroll_state,
            fps_notification_system,
        )
            .chain(),
    );

    // Per-frame animation: director and particles, then intro, then upload.
    app.add_systems(
        Update,
        (
            handle_canvas_clicks,
            update_scroll_camera,
            update_model_tilt,
            animate_particles,
            upload_particle_mesh,
        )
            .chain()
            .after(apply_lifecycle_events)
            .run_if(in_state(AppState::Running))
            .run_if(animation_running)
            .run_if(resource_exists::<ParticleSet>),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (forward_wheel_as_scroll, native_shortcuts).before(apply_scroll_events),
        );
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_background_camera(commands: &mut Commands, framing: &CameraFraming) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR,
            far: FAR,
            ..default()
        }),
        framing.transform(0.0),
        BackgroundCamera,
    ));
}

// Startup system: camera framed for the initial window, scroll measured
// against its height.
fn setup(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut framing: ResMut<CameraFraming>,
    mut scroll: ResMut<ScrollState>,
) {
    if let Ok(window) = windows.single() {
        *framing = CameraFraming::for_viewport(window.width(), window.height())
            .with_anchor(framing.anchor);
        scroll.resize(window.height());
    }
    spawn_background_camera(&mut commands, &framing);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
