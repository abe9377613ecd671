//! Current integration test
//!
//! Currents через ECS (FixedUpdate 60Hz, ManualDuration):
//! - stream разгоняет игрока до cap и не дальше
//! - gust duty cycle тикает по fixed time
//! - swinging / dashing игрок currents игнорирует
//! - particle bursts уходят событиями

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use marginalia_simulation::shared::rect_xywh;
use marginalia_simulation::*;

const DT: f32 = 1.0 / 60.0;

#[derive(Resource, Default)]
struct BurstLog(Vec<ParticleSpec>);

fn collect_bursts(mut bursts: EventReader<ParticleBurst>, mut log: ResMut<BurstLog>) {
    log.0.extend(bursts.read().map(|burst| burst.0.clone()));
}

fn create_current_app(config: TraversalConfig, zones: Vec<CurrentZone>) -> App {
    let mut app = create_headless_app(7);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(config)
        .add_plugins(TraversalPlugin)
        .init_resource::<BurstLog>()
        .add_systems(Update, collect_bursts);

    install_room(
        app.world_mut(),
        &RoomLayout {
            anchors: Vec::new(),
            zones,
        },
    );

    app.update();
    app
}

fn instant_ramp() -> TraversalConfig {
    let mut config = TraversalConfig::default();
    config.currents.ramp_up_rate = 1.0;
    config
}

fn river() -> CurrentZone {
    CurrentZone::stream("river", rect_xywh(-5000.0, -500.0, 20000.0, 1000.0), Vec2::X, 400.0)
}

fn velocity_of(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<PlayerKinematics>(entity).unwrap().velocity
}

#[test]
fn test_stream_accelerates_to_cap() {
    let mut app = create_current_app(instant_ramp(), vec![river()]);
    let player = app
        .world_mut()
        .spawn((Player, PlayerKinematics::new(Vec2::ZERO, Vec2::ZERO)))
        .id();

    for tick in 1..=30 {
        app.update();
        let expected = 400.0 * DT * tick as f32;
        assert!((velocity_of(&app, player).x - expected).abs() < 1e-2, "tick {}", tick);
    }

    for _ in 0..120 {
        app.update();
    }
    assert!((velocity_of(&app, player).x - 450.0).abs() < 1e-2);
}

#[test]
fn test_dashing_player_ignores_current() {
    let mut app = create_current_app(instant_ramp(), vec![river()]);
    let player = app
        .world_mut()
        .spawn((
            Player,
            PlayerKinematics::new(Vec2::ZERO, Vec2::new(0.0, 10.0)),
            TraversalInput {
                dashing: true,
                ..default()
            },
        ))
        .id();

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(velocity_of(&app, player), Vec2::new(0.0, 10.0));
}

#[test]
fn test_swinging_player_ignores_current() {
    let mut app = create_current_app(instant_ramp(), vec![river()]);
    install_room(
        app.world_mut(),
        &RoomLayout {
            anchors: vec![VineAnchor::new("vine", Vec2::new(0.0, -50.0), 150.0)],
            zones: vec![river()],
        },
    );
    let player = app
        .world_mut()
        .spawn((Player, PlayerKinematics::new(Vec2::new(0.0, 0.0), Vec2::ZERO)))
        .id();

    app.world_mut().send_event(VineGrabIntent { entity: player });
    for _ in 0..20 {
        app.update();
        let traversal = app.world().resource::<PendulumTraversal>();
        assert!(traversal.is_swinging());
        // Скорость целиком от маятника, без добавки current
        assert_eq!(velocity_of(&app, player), traversal.swing_velocity());
    }
}

#[test]
fn test_gust_cycles_on_fixed_time() {
    let gust = CurrentZone::gust("gust", rect_xywh(0.0, 0.0, 200.0, 200.0), Vec2::X, 600.0, 2.0, 1.5);
    let mut app = create_current_app(TraversalConfig::default(), vec![gust]);

    for _ in 0..100 {
        app.update();
    }
    let field = app.world().resource::<DirectionalFieldSystem>();
    assert!(field.zone("gust").unwrap().gust.active);

    // 2.0s + запас на накопленную ошибку f32
    for _ in 0..25 {
        app.update();
    }
    let field = app.world().resource::<DirectionalFieldSystem>();
    let zone = field.zone("gust").unwrap();
    assert!(!zone.gust.active);
    assert_eq!(zone.effective_strength(), 0.0);
}

#[test]
fn test_particle_bursts_are_emitted_for_visible_zones() {
    let zones = vec![
        CurrentZone::jet("jet", rect_xywh(100.0, 100.0, 100.0, 300.0), Vec2::NEG_Y, 900.0),
        CurrentZone::stream("far", rect_xywh(9000.0, 9000.0, 100.0, 100.0), Vec2::X, 400.0),
    ];
    let mut app = create_current_app(TraversalConfig::default(), zones);

    for _ in 0..30 {
        app.update();
    }

    let bursts = &app.world().resource::<BurstLog>().0;
    // 0.5s / 0.08s ≈ 6 bursts, только видимый jet
    assert!(bursts.len() >= 5 && bursts.len() <= 7, "bursts = {}", bursts.len());
    for burst in bursts {
        assert!(rect_xywh(100.0, 100.0, 100.0, 300.0).contains(burst.position));
        assert_eq!(burst.count, 4);
    }
}

#[test]
fn test_draw_list_collects_flow_and_debug() {
    let mut app = create_current_app(TraversalConfig::default(), vec![river()]);
    app.update();
    let plain = app.world().resource::<DrawList>().len();
    assert!(plain > 0);

    app.world_mut().resource_mut::<DebugOverlay>().enabled = true;
    app.update();
    let draw = app.world().resource::<DrawList>();
    assert!(draw
        .commands()
        .iter()
        .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "stream 400")));
}
