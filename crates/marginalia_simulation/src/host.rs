//! Reference host physics (headless driver / demo client)
//!
//! Traversal слой не знает про tilemap. Настоящий host (engine bridge) решает
//! collision сам; здесь минимальная замена для headless прогонов и клиента:
//! - SolidRects вместо tilemap (пол + стены)
//! - gravity + horizontal input только в MotionMode::Normal
//! - per-axis AABB resolution, grounded → TraversalInput
//! - swing_collision_system: swing position упёрлась в solid → SwingBlocked
//!
//! Работает в FixedUpdate (TraversalSet::Host), после currents и vines.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::components::{MotionMode, Player, PlayerKinematics, TraversalInput};
use crate::shared::{rect_xywh, rects_overlap};
use crate::vine::SwingBlocked;
use crate::TraversalSet;

/// Kinematic контроллер host'а (ходьба + гравитация)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HostController {
    /// Целевая горизонтальная скорость от input (px/s)
    pub move_speed: f32,
    /// Разгон к move_speed (px/s²)
    pub acceleration: f32,
    /// Трение на земле без input (px/s²)
    pub ground_friction: f32,
    /// Скорость во время dash (px/s)
    pub dash_speed: f32,
    /// px/s², Y вниз
    pub gravity: f32,
    /// Cap скорости падения (px/s)
    pub max_fall_speed: f32,
}

impl Default for HostController {
    fn default() -> Self {
        Self {
            move_speed: 260.0,
            acceleration: 1800.0,
            ground_friction: 2200.0,
            dash_speed: 700.0,
            gravity: 1400.0,
            max_fall_speed: 900.0,
        }
    }
}

/// Solid геометрия комнаты (stand-in для tilemap)
#[derive(Resource, Debug, Clone, Default)]
pub struct SolidRects(pub Vec<Rect>);

impl SolidRects {
    /// Пол на y = 700 и стены по краям демо-комнаты (RoomLayout::demo)
    pub fn demo() -> Self {
        Self(vec![
            rect_xywh(-200.0, 700.0, 2400.0, 100.0),
            rect_xywh(-200.0, -400.0, 200.0, 1100.0),
            rect_xywh(2000.0, -400.0, 200.0, 1100.0),
        ])
    }

    /// Первый solid, пересекающий AABB
    pub fn overlapping(&self, aabb: &Rect) -> Option<Rect> {
        self.0.iter().copied().find(|solid| rects_overlap(solid, aabb))
    }
}

/// Двигает `value` к `target` не более чем на `step`
fn approach(value: f32, target: f32, step: f32) -> f32 {
    if value < target {
        (value + step).min(target)
    } else {
        (value - step).max(target)
    }
}

/// System: horizontal input + friction + gravity (только Normal)
///
/// Input не срезает скорость выше move_speed в ту же сторону: импульс от
/// release или current сохраняется.
pub fn host_movement_system(
    mut players: Query<(&HostController, &TraversalInput, &MotionMode, &mut PlayerKinematics), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, input, mode, mut kinematics) in players.iter_mut() {
        if mode.is_swinging() {
            continue;
        }

        let direction = input.right as i32 as f32 - input.left as i32 as f32;
        let vx = kinematics.velocity.x;

        kinematics.velocity.x = if input.dashing && direction != 0.0 {
            direction * controller.dash_speed.max(vx.abs())
        } else if direction != 0.0 {
            let target = direction * controller.move_speed;
            if vx * direction >= controller.move_speed {
                vx
            } else {
                approach(vx, target, controller.acceleration * delta)
            }
        } else if input.grounded {
            approach(vx, 0.0, controller.ground_friction * delta)
        } else {
            vx
        };

        if !input.grounded {
            kinematics.velocity.y = (kinematics.velocity.y + controller.gravity * delta).min(controller.max_fall_speed);
        }
    }
}

/// System: velocity → position с per-axis resolution по SolidRects
///
/// Выставляет TraversalInput.grounded (читают currents на следующем tick).
pub fn host_collision_system(
    solids: Res<SolidRects>,
    mut players: Query<(&MotionMode, &mut PlayerKinematics, &mut TraversalInput), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mode, mut kinematics, mut input) in players.iter_mut() {
        if mode.is_swinging() {
            input.grounded = false;
            continue;
        }

        let half = kinematics.size * 0.5;
        let mut position = kinematics.position;
        let mut velocity = kinematics.velocity;

        // X
        position.x += velocity.x * delta;
        if let Some(solid) = solids.overlapping(&kinematics.aabb_at(position)) {
            position.x = if velocity.x > 0.0 {
                solid.min.x - half.x
            } else {
                solid.max.x + half.x
            };
            velocity.x = 0.0;
        }

        // Y
        let mut grounded = false;
        position.y += velocity.y * delta;
        if let Some(solid) = solids.overlapping(&kinematics.aabb_at(position)) {
            if velocity.y >= 0.0 {
                position.y = solid.min.y - half.y;
                grounded = true;
            } else {
                position.y = solid.max.y + half.y;
            }
            velocity.y = 0.0;
        } else {
            // Стоим ровно на полу: probe на 1px вниз
            let probe = kinematics.aabb_at(position + Vec2::Y);
            grounded = velocity.y >= 0.0 && solids.overlapping(&probe).is_some();
        }

        kinematics.position = position;
        kinematics.velocity = velocity;
        input.grounded = grounded;
    }
}

/// System: swing position упёрлась в solid → SwingBlocked
pub fn swing_collision_system(
    solids: Res<SolidRects>,
    players: Query<(Entity, &MotionMode, &PlayerKinematics), With<Player>>,
    mut blocked: EventWriter<SwingBlocked>,
) {
    for (entity, mode, kinematics) in players.iter() {
        if !mode.is_swinging() {
            continue;
        }

        if solids.overlapping(&kinematics.aabb()).is_some() {
            blocked.write(SwingBlocked { entity });
        }
    }
}

/// Host physics plugin (TraversalSet::Host)
pub struct HostPhysicsPlugin;

impl Plugin for HostPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SolidRects>()
            .register_type::<HostController>()
            .add_systems(
                FixedUpdate,
                (host_movement_system, host_collision_system, swing_collision_system)
                    .chain()
                    .in_set(TraversalSet::Host),
            );
    }
}
