//! MotionMode - кто двигает игрока в этом frame
//!
//! Вместо разбросанных boolean флагов ("suppress normal physics") один enum,
//! который пишут только vine системы (attach/release), а читают:
//! - current системы (пропускают Swinging)
//! - host physics (gravity/collision только в Normal)

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum MotionMode {
    /// Обычная физика host'а (gravity + tile collision) + currents
    #[default]
    Normal,

    /// Висим на vine - позицию целиком задаёт PendulumTraversal
    Swinging {
        /// Индекс anchor в PendulumTraversal
        anchor: usize,
    },
}

impl MotionMode {
    pub fn is_swinging(&self) -> bool {
        matches!(self, MotionMode::Swinging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(MotionMode::default(), MotionMode::Normal);
        assert!(!MotionMode::Normal.is_swinging());
        assert!(MotionMode::Swinging { anchor: 3 }.is_swinging());
    }
}
