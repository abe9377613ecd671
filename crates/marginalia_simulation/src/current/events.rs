//! Current events (ECS → host)

use bevy::prelude::*;

use super::ParticleSpec;

/// Event: host particle system должен выпустить burst
///
/// Генерируется emit_current_particles_system с фиксированной cadence.
#[derive(Event, Debug, Clone)]
pub struct ParticleBurst(pub ParticleSpec);
