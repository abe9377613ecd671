use bevy::prelude::*;
use marginalia_simulation::{
    init_logger, install_room, log_error, HostController, HostPhysicsPlugin, Player, PlayerKinematics, RoomLayout,
    SimulationPlugin, SolidRects, TraversalConfig,
};

mod camera;
mod input;
mod particles;
mod rendering;

use camera::CameraPlugin;
use input::InputPlugin;
use particles::ParticlePlugin;
use rendering::RenderingSyncPlugin;

/// Стартовая позиция игрока в демо-комнате (на полу, левее первого vine)
const PLAYER_SPAWN: Vec2 = Vec2::new(200.0, 640.0);

fn main() {
    init_logger();

    let (room, config) = load_assets_from_args();

    let mut app = App::new();
    app
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Marginalia - Traversal Sandbox".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Config до SimulationPlugin: traversal resources строятся из него
        .insert_resource(config)
        .insert_resource(SolidRects::demo())
        // Simulation (headless ECS logic) + reference host physics
        .add_plugins((SimulationPlugin, HostPhysicsPlugin))
        // Keyboard → TraversalInput / intents
        .add_plugins(InputPlugin)
        // DrawList → gizmos, player / solids visuals
        .add_plugins(RenderingSyncPlugin)
        // ParticleBurst → короткоживущие частицы
        .add_plugins(ParticlePlugin)
        // Camera follow + ViewportRect
        .add_plugins(CameraPlugin)
        .add_systems(Startup, spawn_player);

    install_room(app.world_mut(), &room);
    app.run();
}

/// `marginalia_client [room.toml] [traversal.toml]`
fn load_assets_from_args() -> (RoomLayout, TraversalConfig) {
    let mut args = std::env::args().skip(1);

    let room = match args.next() {
        Some(path) => RoomLayout::load_from_file(&path).unwrap_or_else(|err| {
            log_error(&format!("Room error: {}, using demo room", err));
            RoomLayout::demo()
        }),
        None => RoomLayout::demo(),
    };

    let config = match args.next() {
        Some(path) => TraversalConfig::load_from_file(&path).unwrap_or_else(|err| {
            log_error(&format!("Config error: {}, using defaults", err));
            TraversalConfig::default()
        }),
        None => TraversalConfig::default(),
    };

    (room, config)
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        // MotionMode / TraversalInput добавятся через Required Components
        PlayerKinematics::new(PLAYER_SPAWN, Vec2::ZERO),
        HostController::default(),
        rendering::NeedsVisual,
    ));
}
