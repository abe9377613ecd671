//! Vine integration test
//!
//! Полный цикл через ECS: grab intent → swinging → release / blocked.
//! Проверяем:
//! - MotionMode переключается только vine системами
//! - PlayerKinematics следует за swing position
//! - release velocity (boost) и blocked release (половина, в т.ч. от реальной стены)

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use marginalia_simulation::*;

/// Лог VineReleased событий (собирается в Update)
#[derive(Resource, Default)]
struct ReleasedLog(Vec<VineReleased>);

#[derive(Resource, Default)]
struct AttachedLog(Vec<VineAttached>);

fn collect_vine_events(
    mut released: EventReader<VineReleased>,
    mut attached: EventReader<VineAttached>,
    mut released_log: ResMut<ReleasedLog>,
    mut attached_log: ResMut<AttachedLog>,
) {
    released_log.0.extend(released.read().cloned());
    attached_log.0.extend(attached.read().cloned());
}

/// Attach range для swing тестов: Scenario A (игрок в 150px от anchor) должен хвататься
const TEST_ATTACH_RANGE: f32 = 200.0;

/// Helper: headless app с traversal plugin и ровно одним FixedUpdate на update()
fn create_swing_app(anchors: Vec<VineAnchor>) -> App {
    build_swing_app(anchors, None)
}

/// Helper: то же + reference host physics со стенами
fn create_swing_app_with_solids(anchors: Vec<VineAnchor>, solids: SolidRects) -> App {
    build_swing_app(anchors, Some(solids))
}

fn build_swing_app(anchors: Vec<VineAnchor>, solids: Option<SolidRects>) -> App {
    let mut config = TraversalConfig::default();
    config.pendulum.attach_range = TEST_ATTACH_RANGE;

    let mut app = create_headless_app(42);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(config)
        .add_plugins(TraversalPlugin)
        .init_resource::<ReleasedLog>()
        .init_resource::<AttachedLog>()
        .add_systems(Update, collect_vine_events);

    if let Some(solids) = solids {
        app.insert_resource(solids).add_plugins(HostPhysicsPlugin);
    }

    install_room(
        app.world_mut(),
        &RoomLayout {
            anchors,
            zones: Vec::new(),
        },
    );

    // Первый update: delta = 0
    app.update();
    app
}

fn scenario_anchor() -> Vec<VineAnchor> {
    vec![VineAnchor::new("vine_a", Vec2::new(300.0, 100.0), 150.0)]
}

fn spawn_player(app: &mut App, position: Vec2, velocity: Vec2) -> Entity {
    app.world_mut()
        .spawn((Player, PlayerKinematics::new(position, velocity)))
        .id()
}

fn grab(app: &mut App, entity: Entity) {
    app.world_mut().send_event(VineGrabIntent { entity });
    app.update();
}

#[test]
fn test_grab_enters_swinging_mode() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(300.0, 250.0), Vec2::new(200.0, 0.0));

    grab(&mut app, player);

    assert_eq!(
        *app.world().get::<MotionMode>(player).unwrap(),
        MotionMode::Swinging { anchor: 0 }
    );
    let traversal = app.world().resource::<PendulumTraversal>();
    assert!(traversal.is_swinging());
    // ω после attach ≈ 1.067, один tick почти не меняет
    assert!((traversal.angular_velocity() - 1.0667).abs() < 0.02);

    let attached = &app.world().resource::<AttachedLog>().0;
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].anchor_id, "vine_a");
    assert_eq!(attached[0].entity, player);
}

#[test]
fn test_kinematics_follow_swing() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(380.0, 200.0), Vec2::ZERO);
    grab(&mut app, player);

    for _ in 0..90 {
        app.update();

        let kinematics = *app.world().get::<PlayerKinematics>(player).unwrap();
        let traversal = app.world().resource::<PendulumTraversal>();
        assert_eq!(kinematics.position, traversal.swing_position());
        assert_eq!(kinematics.velocity, traversal.swing_velocity());

        let rope = kinematics.position.distance(Vec2::new(300.0, 100.0));
        assert!((rope - traversal.current_rope_length()).abs() < 1e-2);
    }
}

#[test]
fn test_release_applies_boost() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(300.0, 250.0), Vec2::new(200.0, 0.0));
    grab(&mut app, player);
    for _ in 0..10 {
        app.update();
    }

    app.world_mut().send_event(VineReleaseIntent { entity: player });
    app.update();

    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
    assert!(!app.world().resource::<PendulumTraversal>().is_swinging());

    let released = &app.world().resource::<ReleasedLog>().0;
    assert_eq!(released.len(), 1);
    assert!(!released[0].blocked);

    let kinematics = app.world().get::<PlayerKinematics>(player).unwrap();
    assert_eq!(kinematics.velocity, released[0].velocity);
    // Игрок ещё летит вправо-вверх по дуге, release не гасит скорость
    assert!(kinematics.velocity.x > 0.0);
    assert!(kinematics.speed() > 100.0);
}

#[test]
fn test_blocked_swing_halves_release() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(300.0, 250.0), Vec2::new(200.0, 0.0));
    grab(&mut app, player);
    for _ in 0..5 {
        app.update();
    }

    let traversal = app.world().resource::<PendulumTraversal>();
    assert!(traversal.is_swinging());
    let expected = traversal.swing_velocity() * traversal.config().release_boost * vine::BLOCKED_RELEASE_SCALE;

    app.world_mut().send_event(SwingBlocked { entity: player });
    app.update();

    let event = app.world().resource::<ReleasedLog>().0[0].clone();
    assert!(event.blocked);
    // Detach до swing step: velocity из предыдущего tick, без лишнего шага
    assert!((event.velocity - expected).length() < 1e-3);
    assert_eq!(app.world().get::<PlayerKinematics>(player).unwrap().velocity, expected);
    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
}

#[test]
fn test_wall_overlap_releases_with_overlap_tick_velocity() {
    let wall = SolidRects(vec![Rect::new(330.0, -500.0, 430.0, 500.0)]);
    let mut app = create_swing_app_with_solids(scenario_anchor(), wall.clone());
    let player = spawn_player(&mut app, Vec2::new(300.0, 150.0), Vec2::new(900.0, 0.0));
    grab(&mut app, player);
    assert_eq!(app.world().resource::<AttachedLog>().0.len(), 1);

    // (position, velocity) последнего swinging tick
    let mut last_swing = None;
    for _ in 0..30 {
        let traversal = app.world().resource::<PendulumTraversal>();
        if traversal.is_swinging() {
            last_swing = Some((traversal.swing_position(), traversal.swing_velocity()));
        }

        app.update();
        if !app.world().resource::<ReleasedLog>().0.is_empty() {
            break;
        }
    }

    let released = &app.world().resource::<ReleasedLog>().0;
    assert_eq!(released.len(), 1, "swing так и не упёрся в стену");
    assert!(released[0].blocked);

    let (position, velocity) = last_swing.unwrap();
    let size = app.world().get::<PlayerKinematics>(player).unwrap().size;
    assert!(wall.overlapping(&Rect::from_center_size(position, size)).is_some());

    let boost = app.world().resource::<PendulumTraversal>().config().release_boost;
    let expected = velocity * boost * vine::BLOCKED_RELEASE_SCALE;
    assert!((released[0].velocity - expected).length() < 1e-3);
    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
}

#[test]
fn test_grab_out_of_range_stays_normal() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(300.0, 400.0), Vec2::ZERO);
    grab(&mut app, player);

    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
    assert!(!app.world().resource::<PendulumTraversal>().is_swinging());
    assert!(app.world().resource::<AttachedLog>().0.is_empty());
}

#[test]
fn test_inactive_anchor_is_never_grabbed() {
    let mut app = create_swing_app(vec![
        VineAnchor::new("burnt", Vec2::new(300.0, 100.0), 150.0).inactive(),
    ]);
    let player = spawn_player(&mut app, Vec2::new(300.0, 140.0), Vec2::ZERO);
    grab(&mut app, player);

    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
}

#[test]
fn test_second_grab_while_swinging_is_ignored() {
    let mut app = create_swing_app(vec![
        VineAnchor::new("first", Vec2::new(300.0, 100.0), 150.0),
        VineAnchor::new("second", Vec2::new(340.0, 100.0), 150.0),
    ]);
    let player = spawn_player(&mut app, Vec2::new(300.0, 140.0), Vec2::ZERO);
    grab(&mut app, player);
    grab(&mut app, player);

    assert_eq!(app.world().resource::<AttachedLog>().0.len(), 1);
    assert_eq!(
        *app.world().get::<MotionMode>(player).unwrap(),
        MotionMode::Swinging { anchor: 0 }
    );
}

#[test]
fn test_release_without_swing_is_noop() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));

    app.world_mut().send_event(VineReleaseIntent { entity: player });
    app.update();

    assert!(app.world().resource::<ReleasedLog>().0.is_empty());
    assert_eq!(app.world().get::<PlayerKinematics>(player).unwrap().velocity, Vec2::new(50.0, 0.0));
}

#[test]
fn test_room_reload_drops_swing() {
    let mut app = create_swing_app(scenario_anchor());
    let player = spawn_player(&mut app, Vec2::new(300.0, 250.0), Vec2::ZERO);
    grab(&mut app, player);
    assert_eq!(
        *app.world().get::<MotionMode>(player).unwrap(),
        MotionMode::Swinging { anchor: 0 }
    );

    install_room(app.world_mut(), &RoomLayout::default());
    assert!(!app.world().resource::<PendulumTraversal>().is_swinging());
    app.update();

    assert_eq!(*app.world().get::<MotionMode>(player).unwrap(), MotionMode::Normal);
}
