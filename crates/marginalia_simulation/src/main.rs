//! Headless симуляция Marginalia traversal
//!
//! Демо-комната (или room файл), скриптованный input: прыжок под vine → grab →
//! pump → release, лог траектории игрока.
//!
//! Usage: marginalia_simulation [--room room.toml] [--config traversal.toml] [--ticks N]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use marginalia_simulation::*;

const DEFAULT_TICKS: u32 = 600;

struct Args {
    room: Option<String>,
    config: Option<String>,
    ticks: u32,
}

fn parse_args() -> Args {
    let mut args = Args {
        room: None,
        config: None,
        ticks: DEFAULT_TICKS,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--room" => args.room = iter.next(),
            "--config" => args.config = iter.next(),
            "--ticks" => {
                if let Some(ticks) = iter.next().and_then(|value| value.parse().ok()) {
                    args.ticks = ticks;
                }
            }
            other => log_warning(&format!("Unknown argument: {}", other)),
        }
    }

    args
}

/// Скриптованный input по номеру tick
///
/// 2 grab, 2..150 pump вправо, 150 release, дальше свободный полёт.
fn scripted_input(tick: u32) -> (TraversalInput, Option<bool>) {
    let input = TraversalInput {
        right: tick < 150,
        ..default()
    };

    let intent = match tick {
        2 => Some(true),
        150 => Some(false),
        _ => None,
    };

    (input, intent)
}

fn main() {
    let seed = 42;
    let args = parse_args();

    let mut app = create_headless_app(seed);
    log_info(&format!("Starting Marginalia headless simulation (seed: {})", seed));

    let config = match args.config.as_deref().map(TraversalConfig::load_from_file) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log_error(&format!("Config error: {}, using defaults", err));
            TraversalConfig::default()
        }
        None => TraversalConfig::default(),
    };

    let room = match args.room.as_deref().map(RoomLayout::load_from_file) {
        Some(Ok(room)) => room,
        Some(Err(err)) => {
            log_error(&format!("Room error: {}, using demo room", err));
            RoomLayout::demo()
        }
        None => RoomLayout::demo(),
    };

    app.insert_resource(config)
        .insert_resource(SolidRects::demo())
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_plugins((TraversalPlugin, HostPhysicsPlugin));
    install_room(app.world_mut(), &room);

    let player = app
        .world_mut()
        .spawn((
            Player,
            // Чуть ниже vine_west демо-комнаты, в attach range
            PlayerKinematics::new(Vec2::new(420.0, 270.0), Vec2::ZERO),
            HostController::default(),
        ))
        .id();

    // Первый update: Time delta = 0, FixedUpdate не запускается
    app.update();

    for tick in 0..args.ticks {
        let (input, intent) = scripted_input(tick);
        if let Some(mut player_input) = app.world_mut().get_mut::<TraversalInput>(player) {
            let grounded = player_input.grounded;
            *player_input = TraversalInput { grounded, ..input };
        }
        match intent {
            Some(true) => {
                app.world_mut().send_event(VineGrabIntent { entity: player });
            }
            Some(false) => {
                app.world_mut().send_event(VineReleaseIntent { entity: player });
            }
            None => {}
        }

        app.update();

        if tick % 30 == 0 {
            let world = app.world();
            if let (Some(kinematics), Some(mode)) = (
                world.get::<PlayerKinematics>(player),
                world.get::<MotionMode>(player),
            ) {
                log_info(&format!(
                    "Tick {}: pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) mode={:?} draws={}",
                    tick,
                    kinematics.position.x,
                    kinematics.position.y,
                    kinematics.velocity.x,
                    kinematics.velocity.y,
                    mode,
                    world.resource::<DrawList>().len()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
