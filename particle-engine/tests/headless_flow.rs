use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use particle_engine::engine::camera::{BackgroundCamera, CameraFraming};
use particle_engine::engine::core::app_state::AppState;
use particle_engine::engine::core::lifecycle::{
    BackgroundAnimation, animation_running, apply_lifecycle_events,
};
use particle_engine::engine::director::scroll::ScrollState;
use particle_engine::engine::director::systems::{
    apply_scroll_events, apply_theme_events, notify_scroll_state,
};
use particle_engine::engine::director::theme::Theme;
use particle_engine::engine::input::events::{
    ActiveChanged, CanvasClicked, DisposeRequested, PanelCloseRequested, PanelOpened,
    ScrollChanged, ThemeChanged,
};
use particle_engine::engine::interaction::panel::PanelId;
use particle_engine::engine::interaction::pointer::PointerState;
use particle_engine::engine::interaction::systems::{handle_canvas_clicks, handle_panel_close};
use particle_engine::engine::particles::particle_set::{ParticleSet, TextTarget};
use particle_engine::engine::particles::scatter::TextScatter;
use particle_engine::engine::particles::systems::{ParticleRng, animate_particles};
use particle_engine::rpc::web_rpc::{MessageQueue, WebRpcInterface, WebRpcPlugin};

/// The frame systems wired as in the real app, minus windowing and GPU.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_state::<AppState>()
        .add_plugins(WebRpcPlugin)
        .init_resource::<BackgroundAnimation>()
        .init_resource::<ScrollState>()
        .init_resource::<Theme>()
        .init_resource::<PointerState>()
        .init_resource::<TextScatter>()
        .init_resource::<CameraFraming>()
        .insert_resource(ParticleRng::seeded(Some(1)))
        .add_event::<ScrollChanged>()
        .add_event::<ThemeChanged>()
        .add_event::<PanelCloseRequested>()
        .add_event::<ActiveChanged>()
        .add_event::<DisposeRequested>()
        .add_event::<PanelOpened>()
        .add_systems(
            Update,
            (
                apply_scroll_events,
                apply_theme_events,
                handle_panel_close,
                apply_lifecycle_events,
                notify_scroll_state,
                animate_particles
                    .run_if(animation_running)
                    .run_if(resource_exists::<ParticleSet>),
            )
                .chain(),
        );

    let positions = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)];
    let mut set = ParticleSet::new(positions, vec![Vec3::new(0.5, 0.2, 0.1); 2]);
    set.set_targets(vec![
        Some(TextTarget {
            position: Vec3::new(0.0, 5.0, 5.0),
            group: 0,
        }),
        None,
    ]);
    app.insert_resource(set);
    app.world_mut()
        .spawn((Transform::from_xyz(0.0, -60.0, 5.0), BackgroundCamera));
    app.world_mut()
        .resource_mut::<BackgroundAnimation>()
        .start();
    app
}

fn push(app: &App, message: &str) {
    app.world().resource::<MessageQueue>().push(message);
}

#[test]
fn host_scroll_drives_reassembly() {
    let mut app = headless_app();
    push(
        &app,
        r#"{"jsonrpc":"2.0","method":"set_scroll","params":{"offset_px":1600,"viewport_height_px":800},"id":7}"#,
    );
    // One frame to turn the message into an event, one to apply it.
    app.update();
    app.update();

    let scroll = app.world().resource::<ScrollState>();
    assert_eq!(scroll.progress(), 2.0);

    let set = app.world().resource::<ParticleSet>();
    assert!(set.dispersion_vectors().is_some());
    assert!(set.current_positions()[0].abs_diff_eq(Vec3::new(0.0, 5.0, 5.0), 1e-3));
    // Light theme pulls reassembled colours to black.
    assert!(set.current_colors()[0].abs_diff_eq(Vec3::ZERO, 1e-6));
}

#[test]
fn theme_notification_without_id_still_applies() {
    let mut app = headless_app();
    push(
        &app,
        r#"{"jsonrpc":"2.0","method":"set_theme","params":{"theme":"dark"}}"#,
    );
    app.update();
    app.update();
    assert_eq!(*app.world().resource::<Theme>(), Theme::Dark);
}

#[test]
fn pause_freezes_particles_and_dispose_is_final() {
    let mut app = headless_app();
    app.update();
    push(
        &app,
        r#"{"jsonrpc":"2.0","method":"set_active","params":{"active":false}}"#,
    );
    app.update();
    app.update();
    assert!(!app.world().resource::<BackgroundAnimation>().is_running());

    let frozen = app.world().resource::<ParticleSet>().current_positions().to_vec();
    app.update();
    assert_eq!(
        app.world().resource::<ParticleSet>().current_positions(),
        frozen.as_slice()
    );

    push(&app, r#"{"jsonrpc":"2.0","method":"dispose"}"#);
    push(
        &app,
        r#"{"jsonrpc":"2.0","method":"set_active","params":{"active":true}}"#,
    );
    app.update();
    app.update();
    app.update();
    let animation = app.world().resource::<BackgroundAnimation>();
    assert!(animation.is_disposed());
    assert!(!animation.is_running());
    assert_eq!(
        *app.world().resource::<State<AppState>>().get(),
        AppState::Disposed
    );
}

#[test]
fn closing_a_panel_starts_scatter_in() {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<TextScatter>()
        .scatter_out(PanelId::About);
    push(
        &app,
        r#"{"jsonrpc":"2.0","method":"close_panel","params":{"panel":"about-window"},"id":2}"#,
    );
    app.update();
    app.update();
    let scatter = app.world().resource::<TextScatter>();
    assert!(scatter.is_active());
    assert_eq!(
        scatter.direction(),
        particle_engine::engine::particles::scatter::ScatterDirection::In
    );
}

#[test]
fn scroll_state_is_pushed_only_on_change() {
    let mut app = headless_app();
    app.update();
    app.update();
    // Nothing moved after the first report; the outgoing queue is drained
    // every frame, so a quiet frame leaves it empty.
    assert!(
        app.world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .is_empty()
    );
}

#[test]
fn clicks_without_a_camera_are_dropped() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(ScrollState::new(1600.0, 800.0))
        .init_resource::<TextScatter>()
        .insert_resource(ParticleRng::seeded(Some(1)))
        .insert_resource(ParticleSet::new(vec![Vec3::ZERO], vec![Vec3::ONE]))
        .add_event::<CanvasClicked>()
        .add_systems(Update, handle_canvas_clicks);

    for x in [10.0, 20.0, 30.0] {
        app.world_mut().send_event(CanvasClicked {
            position: Vec2::new(x, 10.0),
        });
    }
    app.update();
    assert!(!app.world().resource::<TextScatter>().is_active());

    // Clicks from the camera-less frame must not replay once one appears.
    app.world_mut()
        .spawn((Camera::default(), GlobalTransform::default(), BackgroundCamera));
    app.update();
    app.update();
    assert!(!app.world().resource::<TextScatter>().is_active());
}
