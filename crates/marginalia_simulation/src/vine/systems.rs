//! Vine systems (FixedUpdate, TraversalSet::Vines)
//!
//! Порядок выполнения:
//! 1. vine_grab_system - VineGrabIntent → attach → MotionMode::Swinging
//! 2. swing_blocked_system - SwingBlocked (host, прошлый tick) → detach с половинной velocity
//! 3. swing_step_system - pendulum tick → PlayerKinematics
//! 4. vine_release_system - VineReleaseIntent → detach → MotionMode::Normal
//!
//! PendulumTraversal - один resource: в комнате один игрок, один активный vine.

use bevy::prelude::*;

use crate::components::{MotionMode, Player, PlayerKinematics, TraversalInput};

use super::{
    PendulumTraversal, SwingBlocked, SwingControls, VineAttached, VineGrabIntent, VineReleaseIntent,
    VineReleased,
};

/// Release velocity при ударе о стену умножается на это
pub const BLOCKED_RELEASE_SCALE: f32 = 0.5;

/// System: grab intent → attach к ближайшему active anchor
pub fn vine_grab_system(
    mut intents: EventReader<VineGrabIntent>,
    mut traversal: ResMut<PendulumTraversal>,
    mut players: Query<(&PlayerKinematics, &mut MotionMode), With<Player>>,
    mut attached: EventWriter<VineAttached>,
) {
    for intent in intents.read() {
        let Ok((kinematics, mut mode)) = players.get_mut(intent.entity) else {
            continue;
        };

        if mode.is_swinging() || traversal.is_swinging() {
            continue;
        }

        let range = traversal.config().attach_range;
        let Some(index) = traversal.find_nearest_anchor(kinematics.position, range) else {
            continue;
        };

        if !traversal.attach(index, kinematics.position, kinematics.velocity) {
            continue;
        }

        *mode = MotionMode::Swinging { anchor: index };

        if let Some(anchor) = traversal.anchor(index) {
            attached.write(VineAttached {
                entity: intent.entity,
                anchor_id: anchor.id.clone(),
            });
        }
    }
}

/// System: один pendulum tick для swinging игрока
///
/// Пишет swing_position / swing_velocity в PlayerKinematics.
/// Если traversal сброшен извне (reset / смена комнаты) - возвращает MotionMode::Normal.
pub fn swing_step_system(
    mut traversal: ResMut<PendulumTraversal>,
    mut players: Query<(&TraversalInput, &mut PlayerKinematics, &mut MotionMode), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, mut kinematics, mut mode) in players.iter_mut() {
        if !mode.is_swinging() {
            continue;
        }

        if !traversal.is_swinging() {
            *mode = MotionMode::Normal;
            continue;
        }

        let controls = SwingControls {
            left: input.left,
            right: input.right,
            up: input.up,
            down: input.down,
        };
        kinematics.position = traversal.update(delta, controls);
        kinematics.velocity = traversal.swing_velocity();
    }
}

/// System: release intent → detach, velocity = swing_velocity · release_boost
pub fn vine_release_system(
    mut intents: EventReader<VineReleaseIntent>,
    mut traversal: ResMut<PendulumTraversal>,
    mut players: Query<(&mut PlayerKinematics, &mut MotionMode), With<Player>>,
    mut released: EventWriter<VineReleased>,
) {
    for intent in intents.read() {
        let Ok((mut kinematics, mut mode)) = players.get_mut(intent.entity) else {
            continue;
        };
        if !mode.is_swinging() {
            continue;
        }

        let velocity = traversal.detach();
        kinematics.velocity = velocity;
        *mode = MotionMode::Normal;

        released.write(VineReleased {
            entity: intent.entity,
            velocity,
            blocked: false,
        });
    }
}

/// System: swing упёрся в tilemap → detach с половинной release velocity
///
/// Идёт до swing_step_system: pendulum не делает лишний шаг в стену,
/// swing_velocity ещё та, что была в tick overlap.
pub fn swing_blocked_system(
    mut blocked_events: EventReader<SwingBlocked>,
    mut traversal: ResMut<PendulumTraversal>,
    mut players: Query<(&mut PlayerKinematics, &mut MotionMode), With<Player>>,
    mut released: EventWriter<VineReleased>,
) {
    for blocked in blocked_events.read() {
        let Ok((mut kinematics, mut mode)) = players.get_mut(blocked.entity) else {
            continue;
        };
        if !mode.is_swinging() {
            continue;
        }

        let velocity = traversal.detach() * BLOCKED_RELEASE_SCALE;
        kinematics.velocity = velocity;
        *mode = MotionMode::Normal;

        crate::log(&format!(
            "Swing blocked by tilemap: {:?} released at ({:.1}, {:.1})",
            blocked.entity, velocity.x, velocity.y
        ));

        released.write(VineReleased {
            entity: blocked.entity,
            velocity,
            blocked: true,
        });
    }
}
