use bevy::prelude::*;
use marginalia_simulation::{
    DebugOverlay, MotionMode, Player, PlayerKinematics, TraversalInput, VineGrabIntent, VineReleaseIntent,
};

/// Скорость прыжка (px/s, вверх = −Y в simulation space)
const JUMP_SPEED: f32 = 560.0;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (read_held_input, handle_action_key, toggle_debug_overlay));
    }
}

fn held(keys: &ButtonInput<KeyCode>, primary: KeyCode, secondary: KeyCode) -> bool {
    keys.pressed(primary) || keys.pressed(secondary)
}

/// Held direction keys → TraversalInput (grounded пишет host physics)
fn read_held_input(keys: Res<ButtonInput<KeyCode>>, mut query: Query<&mut TraversalInput, With<Player>>) {
    for mut input in query.iter_mut() {
        input.left = held(&keys, KeyCode::KeyA, KeyCode::ArrowLeft);
        input.right = held(&keys, KeyCode::KeyD, KeyCode::ArrowRight);
        input.up = held(&keys, KeyCode::KeyW, KeyCode::ArrowUp);
        input.down = held(&keys, KeyCode::KeyS, KeyCode::ArrowDown);
        input.dashing = keys.pressed(KeyCode::ShiftLeft);
    }
}

/// Space: swinging → release, на земле → прыжок, в воздухе → grab
fn handle_action_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<(Entity, &MotionMode, &TraversalInput, &mut PlayerKinematics), With<Player>>,
    mut grab: EventWriter<VineGrabIntent>,
    mut release: EventWriter<VineReleaseIntent>,
) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }

    for (entity, mode, input, mut kinematics) in query.iter_mut() {
        if mode.is_swinging() {
            release.write(VineReleaseIntent { entity });
        } else if input.grounded {
            kinematics.velocity.y = -JUMP_SPEED;
        } else {
            grab.write(VineGrabIntent { entity });
        }
    }
}

fn toggle_debug_overlay(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if keys.just_pressed(KeyCode::F1) {
        overlay.enabled = !overlay.enabled;
    }
}
