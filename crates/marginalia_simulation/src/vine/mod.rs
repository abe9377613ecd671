//! Vine domain - pendulum traversal
//!
//! Содержит:
//! - VineAnchor / VineKind (level data)
//! - PendulumTraversal (resource: anchors + swing state + integration)
//! - render (idle sway, rope sag, swing arc)
//! - events + systems (grab / step / release / blocked)

use bevy::prelude::*;

pub mod anchor;
pub mod events;
pub mod render;
pub mod systems;
pub mod traversal;


pub use anchor::{VineAnchor, VineKind};
pub use events::*;
pub use systems::{
    swing_blocked_system, swing_step_system, vine_grab_system, vine_release_system, BLOCKED_RELEASE_SCALE,
};
pub use traversal::{PendulumTraversal, SwingControls};

use crate::config::TraversalConfig;
use crate::TraversalSet;

/// Vine Plugin
///
/// Регистрирует vine события и системы в FixedUpdate (TraversalSet::Vines).
/// SwingBlocked от host'а (прошлый tick) обрабатывается до swing step: release
/// velocity берётся из tick'а, в котором swing упёрся в solid.
/// PendulumTraversal создаётся из TraversalConfig (если host не вставил свой).
pub struct VinePlugin;

impl Plugin for VinePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<PendulumTraversal>() {
            let config = app
                .world()
                .get_resource::<TraversalConfig>()
                .map(|config| config.pendulum.clone())
                .unwrap_or_default();
            app.insert_resource(PendulumTraversal::new(config));
        }

        app.add_event::<VineGrabIntent>()
            .add_event::<VineReleaseIntent>()
            .add_event::<SwingBlocked>()
            .add_event::<VineAttached>()
            .add_event::<VineReleased>();

        app.add_systems(
            FixedUpdate,
            (
                vine_grab_system,
                swing_blocked_system,
                swing_step_system,
                vine_release_system,
            )
                .chain()
                .in_set(TraversalSet::Vines),
        );
    }
}
