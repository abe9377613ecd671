//! Current domain - directional force fields
//!
//! Содержит:
//! - CurrentZone / CurrentKind / GustCycle (level data + gust phase)
//! - DirectionalFieldSystem (resource: zones + engagement ramps + force composition)
//! - particles (cadence → ParticleSink)
//! - render (flow lines, whirlpool spiral, debug overlay)
//! - systems (gusts / apply / particles)

use bevy::prelude::*;

pub mod events;
pub mod field;
pub mod particles;
pub mod render;
pub mod systems;
pub mod zone;


pub use events::ParticleBurst;
pub use field::DirectionalFieldSystem;
pub use particles::{ParticleSink, ParticleSpec};
pub use systems::{apply_currents_system, emit_current_particles_system, update_gusts_system};
pub use zone::{CurrentKind, CurrentZone, GustCycle, GUST_TELEGRAPH_STRENGTH, GUST_TELEGRAPH_TIME};

use crate::config::TraversalConfig;
use crate::render::ViewportRect;
use crate::{DeterministicRng, TraversalSet};

/// Current Plugin
///
/// FixedUpdate (TraversalSet::Currents): gusts → apply.
/// Update: particle cadence.
pub struct CurrentPlugin;

impl Plugin for CurrentPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DirectionalFieldSystem>() {
            let config = app
                .world()
                .get_resource::<TraversalConfig>()
                .map(|config| config.currents.clone())
                .unwrap_or_default();
            app.insert_resource(DirectionalFieldSystem::new(config));
        }

        app.init_resource::<ViewportRect>()
            .init_resource::<DeterministicRng>()
            .add_event::<ParticleBurst>();

        app.add_systems(
            FixedUpdate,
            (update_gusts_system, apply_currents_system)
                .chain()
                .in_set(TraversalSet::Currents),
        )
        .add_systems(Update, emit_current_particles_system);
    }
}
