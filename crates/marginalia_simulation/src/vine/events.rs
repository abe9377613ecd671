//! Vine events
//!
//! Host → ECS: VineGrabIntent, VineReleaseIntent, SwingBlocked
//! ECS → host: VineAttached, VineReleased

use bevy::prelude::*;

/// Event: игрок хочет схватиться за ближайший vine
///
/// Генерируется host input (grab кнопка в воздухе).
#[derive(Event, Debug, Clone)]
pub struct VineGrabIntent {
    pub entity: Entity,
}

/// Event: игрок отпускает vine (jump / grab toggle)
#[derive(Event, Debug, Clone)]
pub struct VineReleaseIntent {
    pub entity: Entity,
}

/// Event: host обнаружил что AABB вокруг swing_position пересекает tilemap
///
/// Обрабатывается swing_blocked_system: detach + половина release velocity,
/// чтобы не катапультировать игрока в стену.
#[derive(Event, Debug, Clone)]
pub struct SwingBlocked {
    pub entity: Entity,
}

/// Event: игрок зацепился (для анимации / звука)
#[derive(Event, Debug, Clone)]
pub struct VineAttached {
    pub entity: Entity,
    pub anchor_id: String,
}

/// Event: игрок отцепился с этой velocity
#[derive(Event, Debug, Clone)]
pub struct VineReleased {
    pub entity: Entity,
    pub velocity: Vec2,
    /// true если release вызван collision (SwingBlocked)
    pub blocked: bool,
}
