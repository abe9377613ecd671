//! PendulumTraversal - rope-constrained swinging
//!
//! Состояние swing полностью задаётся (angle, rope length); единственная свободная
//! переменная - angular velocity ω.
//!
//! Sign convention (общая для attach / update / detach):
//! - angle = atan2(dx, dy), (dx, dy) = player − anchor
//! - angle 0 = прямо вниз, положительный = вправо
//! - position = anchor + (sin·L, cos·L), velocity = (ω·L·cos, −ω·L·sin)
//!
//! Collision НЕ здесь: host проверяет AABB вокруг `swing_position` по tilemap
//! и при overlap делает detach с половинной скоростью (SwingBlocked).

use bevy::prelude::*;

use crate::config::PendulumConfig;
use crate::shared::{pendulum_offset, seeded_rng};
use rand::Rng;

use super::VineAnchor;

/// Held input для одного swing tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwingControls {
    /// Pump влево (−pump_force)
    pub left: bool,
    /// Pump вправо (+pump_force)
    pub right: bool,
    /// Укоротить верёвку (подняться)
    pub up: bool,
    /// Удлинить верёвку (спуститься)
    pub down: bool,
}

/// Vine system: список anchors + состояние текущего swing (максимум один vine)
#[derive(Resource, Debug, Clone)]
pub struct PendulumTraversal {
    anchors: Vec<VineAnchor>,
    /// Фаза idle sway для каждого anchor (seeded от id, параллельно anchors)
    pub(super) sway_phases: Vec<f32>,
    config: PendulumConfig,

    active_vine: Option<usize>,
    is_swinging: bool,
    angle: f32,
    angular_velocity: f32,
    current_rope_length: f32,
    swing_position: Vec2,
    swing_velocity: Vec2,
}

/// Salt для sway seed (отдельный поток от flow-line seeds)
const SWAY_SEED_SALT: u64 = 0x5A7_0001;

impl PendulumTraversal {
    pub fn new(config: PendulumConfig) -> Self {
        Self {
            anchors: Vec::new(),
            sway_phases: Vec::new(),
            current_rope_length: config.min_rope_length,
            config,
            active_vine: None,
            is_swinging: false,
            angle: 0.0,
            angular_velocity: 0.0,
            swing_position: Vec2::ZERO,
            swing_velocity: Vec2::ZERO,
        }
    }

    pub fn with_anchors(config: PendulumConfig, anchors: Vec<VineAnchor>) -> Self {
        let mut traversal = Self::new(config);
        traversal.set_anchors(anchors);
        traversal
    }

    /// Загрузка комнаты: заменяет anchors и сбрасывает swing
    pub fn set_anchors(&mut self, anchors: Vec<VineAnchor>) {
        self.reset();
        self.sway_phases = anchors
            .iter()
            .map(|anchor| seeded_rng(&anchor.id, SWAY_SEED_SALT).gen_range(0.0..std::f32::consts::TAU))
            .collect();
        self.anchors = anchors;
    }

    pub fn anchors(&self) -> &[VineAnchor] {
        &self.anchors
    }

    pub fn anchor(&self, index: usize) -> Option<&VineAnchor> {
        self.anchors.get(index)
    }

    pub fn anchor_index(&self, id: &str) -> Option<usize> {
        self.anchors.iter().position(|anchor| anchor.id == id)
    }

    /// Включить/выключить anchor. Выключение активного vine не отрывает игрока
    /// (это решает gameplay через detach), только перестаёт предлагать anchor.
    pub fn set_anchor_active(&mut self, id: &str, active: bool) -> bool {
        match self.anchors.iter_mut().find(|anchor| anchor.id == id) {
            Some(anchor) => {
                anchor.active = active;
                true
            }
            None => false,
        }
    }

    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PendulumConfig {
        &mut self.config
    }

    /// Ближайший active anchor в радиусе `range` от `center`
    ///
    /// Ничьи → первый найденный. Inactive anchors никогда не предлагаются.
    pub fn find_nearest_anchor(&self, center: Vec2, range: f32) -> Option<usize> {
        let mut nearest: Option<(usize, f32)> = None;

        for (index, anchor) in self.anchors.iter().enumerate() {
            if !anchor.active {
                continue;
            }

            let distance = anchor.position.distance(center);
            if distance > range {
                continue;
            }

            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((index, distance)),
            }
        }

        nearest.map(|(index, _)| index)
    }

    /// Верхняя граница длины верёвки для anchor (никогда не ниже min)
    fn rope_upper_bound(&self, anchor: &VineAnchor) -> f32 {
        self.config
            .max_rope_length
            .min(anchor.rope_length)
            .max(self.config.min_rope_length)
    }

    /// Войти в swinging mode на anchor `index`
    ///
    /// Linear velocity игрока проецируется на касательную → ω (с momentum_transfer_factor),
    /// так что разбег с прыжка сохраняется в swing.
    ///
    /// Возвращает false (и ничего не меняет) если anchor нет или он inactive.
    pub fn attach(&mut self, index: usize, player_position: Vec2, player_velocity: Vec2) -> bool {
        let Some(anchor) = self.anchors.get(index) else {
            crate::log_warning(&format!("Vine attach: no anchor at index {}", index));
            return false;
        };
        if !anchor.active {
            crate::log_warning(&format!("Vine attach: anchor '{}' is inactive", anchor.id));
            return false;
        }

        let delta = player_position - anchor.position;
        let angle = f32::atan2(delta.x, delta.y);
        let rope_length = delta
            .length()
            .clamp(self.config.min_rope_length, self.rope_upper_bound(anchor));

        let tangential_speed = player_velocity.x * angle.cos() - player_velocity.y * angle.sin();
        let max_omega = self.config.max_angular_velocity;
        let angular_velocity = (tangential_speed / rope_length * self.config.momentum_transfer_factor)
            .clamp(-max_omega, max_omega);

        let anchor_position = anchor.position;
        let anchor_id = anchor.id.clone();

        self.active_vine = Some(index);
        self.is_swinging = true;
        self.angle = angle;
        self.angular_velocity = angular_velocity;
        self.current_rope_length = rope_length;
        self.recompute_kinematics(anchor_position);

        crate::log(&format!(
            "Vine attached: '{}' angle={:.3} ω={:.3} L={:.1}",
            anchor_id, angle, angular_velocity, rope_length
        ));

        true
    }

    /// Отпустить vine: release velocity = swing_velocity · release_boost
    ///
    /// Caller выставляет её как новую velocity и возвращает обычную физику.
    /// Без активного vine - no-op, возвращает (0, 0).
    pub fn detach(&mut self) -> Vec2 {
        if !self.is_swinging || self.active_vine.is_none() {
            return Vec2::ZERO;
        }

        let release_velocity = self.swing_velocity * self.config.release_boost;
        crate::log(&format!(
            "Vine released: velocity=({:.1}, {:.1})",
            release_velocity.x, release_velocity.y
        ));

        self.clear_swing();
        release_velocity
    }

    /// Один integration tick. Возвращает новую swing position.
    ///
    /// Без активного vine ничего не делает (возвращает последнюю position).
    pub fn update(&mut self, dt: f32, controls: SwingControls) -> Vec2 {
        let Some(anchor) = self.active_vine.and_then(|index| self.anchors.get(index)) else {
            return self.swing_position;
        };
        if !self.is_swinging {
            return self.swing_position;
        }

        let anchor_position = anchor.position;
        let rope_upper = self.rope_upper_bound(anchor);
        let config = &self.config;

        // 1. Полное уравнение маятника (без small-angle приближения)
        let mut angular_accel = -(config.gravity / self.current_rope_length) * self.angle.sin();

        // 2. Pump
        if config.can_pump_swing {
            if controls.right {
                angular_accel += config.pump_force;
            }
            if controls.left {
                angular_accel -= config.pump_force;
            }
        }

        // 3. Damping
        self.angular_velocity *= 1.0 - config.angular_damping;

        // 4. Integrate ω (clamp) → angle
        let max_omega = config.max_angular_velocity;
        self.angular_velocity = (self.angular_velocity + angular_accel * dt).clamp(-max_omega, max_omega);
        self.angle += self.angular_velocity * dt;

        // 5. Climb / descend
        if config.can_adjust_length {
            let step = config.rope_length_adjust_speed * dt;
            if controls.up {
                self.current_rope_length -= step;
            }
            if controls.down {
                self.current_rope_length += step;
            }
            self.current_rope_length = self.current_rope_length.clamp(config.min_rope_length, rope_upper);
        }

        // 6. Position + velocity из (angle, L, ω)
        self.recompute_kinematics(anchor_position);

        self.swing_position
    }

    /// Принудительный сброс swing (смерть, room transition)
    pub fn reset(&mut self) {
        self.clear_swing();
        self.swing_position = Vec2::ZERO;
    }

    fn clear_swing(&mut self) {
        self.active_vine = None;
        self.is_swinging = false;
        self.angle = 0.0;
        self.angular_velocity = 0.0;
        self.current_rope_length = self.config.min_rope_length;
        self.swing_velocity = Vec2::ZERO;
    }

    fn recompute_kinematics(&mut self, anchor_position: Vec2) {
        let length = self.current_rope_length;
        self.swing_position = anchor_position + pendulum_offset(self.angle, length);
        self.swing_velocity = Vec2::new(
            self.angular_velocity * length * self.angle.cos(),
            -self.angular_velocity * length * self.angle.sin(),
        );
    }

    pub fn is_swinging(&self) -> bool {
        self.is_swinging
    }

    pub fn active_vine(&self) -> Option<usize> {
        self.active_vine
    }

    pub fn active_anchor(&self) -> Option<&VineAnchor> {
        self.active_vine.and_then(|index| self.anchors.get(index))
    }

    pub fn swing_position(&self) -> Vec2 {
        self.swing_position
    }

    pub fn swing_velocity(&self) -> Vec2 {
        self.swing_velocity
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn current_rope_length(&self) -> f32 {
        self.current_rope_length
    }
}

impl Default for PendulumTraversal {
    fn default() -> Self {
        Self::new(PendulumConfig::default())
    }
}
