//! Current systems
//!
//! FixedUpdate (TraversalSet::Currents):
//! 1. update_gusts_system - duty cycles (до любого запроса силы)
//! 2. apply_currents_system - ramps + сила → PlayerKinematics.velocity
//!
//! Update:
//! - emit_current_particles_system - particle cadence → ParticleBurst events

use bevy::prelude::*;

use crate::components::{MotionMode, Player, PlayerKinematics, TraversalInput};
use crate::render::ViewportRect;
use crate::DeterministicRng;

use super::{DirectionalFieldSystem, ParticleBurst};

/// System: продвинуть gust timers
pub fn update_gusts_system(mut field: ResMut<DirectionalFieldSystem>, time: Res<Time<Fixed>>) {
    field.update_gusts(time.delta_secs());
}

/// System: применить currents к игрокам в MotionMode::Normal
///
/// Swinging игрок ведётся маятником, currents его не трогают.
pub fn apply_currents_system(
    mut field: ResMut<DirectionalFieldSystem>,
    mut players: Query<(&TraversalInput, &mut PlayerKinematics, &MotionMode), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, mut kinematics, mode) in players.iter_mut() {
        if mode.is_swinging() {
            continue;
        }

        field.apply_to_player(&mut kinematics, delta, input.grounded, input.dashing);
    }
}

/// System: particle bursts для видимых зон
pub fn emit_current_particles_system(
    mut field: ResMut<DirectionalFieldSystem>,
    mut rng: ResMut<DeterministicRng>,
    mut bursts: EventWriter<ParticleBurst>,
    viewport: Res<ViewportRect>,
    time: Res<Time>,
) {
    field.update_particles(time.delta_secs(), viewport.0, &mut rng.rng, &mut bursts);
}
