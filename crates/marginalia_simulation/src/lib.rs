//! Marginalia Simulation Core
//!
//! Traversal physics на Bevy 0.16: vines (pendulum swinging) и currents
//! (directional force fields).
//!
//! Разделение ответственности:
//! - ECS = traversal state (swing, zones, ramps, gust phases, MotionMode)
//! - Host (client / engine bridge) = tile collision, input mapping, sprites, particles

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod current;
pub mod error;
pub mod host;
pub mod logger;
pub mod render;
pub mod room;
pub mod shared;
pub mod vine;

// Re-export для удобства host'а
pub use components::*;
pub use config::{CurrentConfig, PendulumConfig, TraversalConfig};
pub use current::{
    CurrentKind, CurrentPlugin, CurrentZone, DirectionalFieldSystem, GustCycle, ParticleBurst, ParticleSink,
    ParticleSpec,
};
pub use error::{Result, TraversalError};
pub use host::{HostController, HostPhysicsPlugin, SolidRects};
pub use logger::*;
pub use render::{DebugOverlay, DrawCommand, DrawList, ViewportRect};
pub use room::{install_room, RoomLayout};
pub use vine::{
    PendulumTraversal, SwingBlocked, SwingControls, VineAnchor, VineAttached, VineGrabIntent, VineKind, VinePlugin,
    VineReleaseIntent, VineReleased,
};

/// Порядок traversal систем внутри FixedUpdate
///
/// Currents → Vines → Host: gusts считаются до любого запроса силы, pendulum
/// tick до того как host читает swing position для collision.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalSet {
    /// update_gusts → apply_currents
    Currents,
    /// grab → blocked → swing step → release
    Vines,
    /// Host physics / collision (client, headless driver)
    Host,
}

/// Traversal plugin: currents + vines + draw list
///
/// TraversalConfig берётся из World если host вставил его заранее, иначе default.
pub struct TraversalPlugin;

impl Plugin for TraversalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TraversalConfig>()
            .register_type::<TraversalConfig>()
            .register_type::<PlayerKinematics>()
            .register_type::<MotionMode>()
            .register_type::<TraversalInput>()
            .configure_sets(
                FixedUpdate,
                (TraversalSet::Currents, TraversalSet::Vines, TraversalSet::Host).chain(),
            )
            .add_plugins((CurrentPlugin, VinePlugin))
            .init_resource::<DrawList>()
            .init_resource::<ViewportRect>()
            .init_resource::<DebugOverlay>()
            .add_systems(Update, render::collect_traversal_draws_system);
    }
}

/// Главный plugin симуляции (fixed 60Hz + deterministic RNG + traversal)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz (pendulum integration)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<DeterministicRng>()
            .add_plugins(TraversalPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Только для particle jitter. Flow lines и vine sway сидятся от id (см. shared::seed).
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Traversal plugin не добавляется: caller может вставить свой TraversalConfig /
/// RoomLayout до `add_plugins(TraversalPlugin)`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
