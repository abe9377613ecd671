//! Player компоненты: kinematic record и held-direction input

use bevy::math::Rect;
use bevy::prelude::*;

use super::MotionMode;

/// Маркер игрока
///
/// Автоматически добавляет PlayerKinematics, MotionMode, TraversalInput через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PlayerKinematics, MotionMode, TraversalInput)]
pub struct Player;

/// Kinematic record игрока (общий ресурс vines/currents/host physics)
///
/// `position` - центр тела. AABB = position ± size/2.
/// Пишет ровно одна motion система за frame (см. MotionMode).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerKinematics {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Default for PlayerKinematics {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: Vec2::new(24.0, 40.0),
        }
    }
}

impl PlayerKinematics {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            ..default()
        }
    }

    pub fn aabb(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// AABB если бы центр стоял в `position` (для collision-check swing position)
    pub fn aabb_at(&self, position: Vec2) -> Rect {
        Rect::from_center_size(position, self.size)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Held input на этот tick
///
/// Input mapping - ответственность host'а; сюда приходят уже булевы флаги.
/// `grounded` / `dashing` выставляет host physics.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TraversalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub grounded: bool,
    pub dashing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_is_centered() {
        let kinematics = PlayerKinematics {
            position: Vec2::new(100.0, 50.0),
            velocity: Vec2::ZERO,
            size: Vec2::new(20.0, 40.0),
        };

        let aabb = kinematics.aabb();
        assert_eq!(aabb.min, Vec2::new(90.0, 30.0));
        assert_eq!(aabb.max, Vec2::new(110.0, 70.0));
        assert_eq!(kinematics.aabb_at(Vec2::ZERO).center(), Vec2::ZERO);
    }

    #[test]
    fn test_speed() {
        let kinematics = PlayerKinematics::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_eq!(kinematics.speed(), 5.0);
        assert_eq!(kinematics.size, PlayerKinematics::default().size);
    }
}
