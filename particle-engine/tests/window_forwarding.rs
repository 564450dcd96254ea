use bevy::input::ButtonState;
use bevy::input::mouse::MouseButtonInput;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use particle_engine::engine::input::events::CanvasClicked;
use particle_engine::engine::input::window_input::forward_clicks;

#[derive(Resource, Default)]
struct Clicks(Vec<Vec2>);

fn collect_clicks(mut events: EventReader<CanvasClicked>, mut clicks: ResMut<Clicks>) {
    clicks.0.extend(events.read().map(|event| event.position));
}

fn click_app() -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_event::<TouchInput>()
        .add_event::<MouseButtonInput>()
        .add_event::<CanvasClicked>()
        .init_resource::<Clicks>()
        .add_systems(Update, (forward_clicks, collect_clicks).chain());
    let window = app
        .world_mut()
        .spawn((Window::default(), PrimaryWindow))
        .id();
    (app, window)
}

fn touch(window: Entity, id: u64, phase: TouchPhase, x: f32, y: f32) -> TouchInput {
    TouchInput {
        phase,
        position: Vec2::new(x, y),
        window,
        force: None,
        id,
    }
}

#[test]
fn tap_becomes_one_click() {
    let (mut app, window) = click_app();
    app.world_mut()
        .send_event(touch(window, 1, TouchPhase::Started, 100.0, 200.0));
    app.update();
    app.world_mut()
        .send_event(touch(window, 1, TouchPhase::Ended, 104.0, 203.0));
    app.update();
    app.update();

    assert_eq!(app.world().resource::<Clicks>().0, vec![Vec2::new(104.0, 203.0)]);
}

#[test]
fn drags_and_cancelled_touches_are_not_taps() {
    let (mut app, window) = click_app();
    app.world_mut()
        .send_event(touch(window, 1, TouchPhase::Started, 100.0, 200.0));
    app.world_mut()
        .send_event(touch(window, 1, TouchPhase::Moved, 100.0, 240.0));
    app.world_mut()
        .send_event(touch(window, 1, TouchPhase::Ended, 100.0, 260.0));
    app.world_mut()
        .send_event(touch(window, 2, TouchPhase::Started, 50.0, 50.0));
    app.world_mut()
        .send_event(touch(window, 2, TouchPhase::Canceled, 50.0, 50.0));
    app.world_mut()
        .send_event(touch(window, 2, TouchPhase::Ended, 50.0, 50.0));
    app.world_mut()
        .send_event(touch(window, 3, TouchPhase::Ended, 10.0, 10.0));
    app.update();

    assert!(app.world().resource::<Clicks>().0.is_empty());
}

#[test]
fn left_press_clicks_at_cursor() {
    let (mut app, window) = click_app();
    app.world_mut()
        .get_mut::<Window>(window)
        .unwrap()
        .set_cursor_position(Some(Vec2::new(30.0, 40.0)));
    for button in [MouseButton::Right, MouseButton::Left] {
        app.world_mut().send_event(MouseButtonInput {
            button,
            state: ButtonState::Pressed,
            window,
        });
    }
    app.world_mut().send_event(MouseButtonInput {
        button: MouseButton::Left,
        state: ButtonState::Released,
        window,
    });
    app.update();

    assert_eq!(app.world().resource::<Clicks>().0, vec![Vec2::new(30.0, 40.0)]);
}
