//! DirectionalFieldSystem - composition of current zones
//!
//! Каждый frame:
//! 1. update_gusts - duty cycle timers (до любого запроса силы)
//! 2. apply_to_player - engagement ramps + сумма сил + asymmetric clamp
//!
//! Ramp сглаживает вход/выход из зоны: сила никогда не включается скачком на границе.

use std::collections::HashMap;

use bevy::math::Rect;
use bevy::prelude::*;

use crate::components::PlayerKinematics;
use crate::config::CurrentConfig;

use super::CurrentZone;

/// Current system: список зон + per-zone engagement ramp
#[derive(Resource, Debug, Clone)]
pub struct DirectionalFieldSystem {
    zones: Vec<CurrentZone>,
    /// zone id → ramp [0, 1]
    ramps: HashMap<String, f32>,
    config: CurrentConfig,
    /// Накопитель времени для particle cadence (см. particles.rs)
    pub(super) particle_accumulator: f32,
}

impl DirectionalFieldSystem {
    pub fn new(config: CurrentConfig) -> Self {
        Self {
            zones: Vec::new(),
            ramps: HashMap::new(),
            config,
            particle_accumulator: 0.0,
        }
    }

    pub fn with_zones(config: CurrentConfig, zones: Vec<CurrentZone>) -> Self {
        let mut field = Self::new(config);
        field.set_zones(zones);
        field
    }

    /// Загрузка комнаты: заменяет зоны, ramps удалённых зон выбрасываются
    pub fn set_zones(&mut self, zones: Vec<CurrentZone>) {
        self.ramps
            .retain(|id, _| zones.iter().any(|zone| &zone.id == id));
        for zone in &zones {
            self.ramps.entry(zone.id.clone()).or_insert(0.0);
        }
        self.zones = zones;
        self.particle_accumulator = 0.0;
    }

    pub fn zones(&self) -> &[CurrentZone] {
        &self.zones
    }

    pub fn zone(&self, id: &str) -> Option<&CurrentZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn zone_mut(&mut self, id: &str) -> Option<&mut CurrentZone> {
        self.zones.iter_mut().find(|zone| zone.id == id)
    }

    /// Включить/выключить зону. Ramp не трогается (продолжает свою bookkeeping).
    pub fn set_zone_active(&mut self, id: &str, active: bool) -> bool {
        match self.zone_mut(id) {
            Some(zone) => {
                zone.active = active;
                true
            }
            None => false,
        }
    }

    /// Текущий ramp зоны (0 если зона неизвестна)
    pub fn ramp(&self, id: &str) -> f32 {
        self.ramps.get(id).copied().unwrap_or(0.0)
    }

    pub fn config(&self) -> &CurrentConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CurrentConfig {
        &mut self.config
    }

    /// Продвинуть gust duty cycles всех gust зон
    pub fn update_gusts(&mut self, dt: f32) {
        for zone in self.zones.iter_mut() {
            if zone.kind != super::CurrentKind::Gust {
                continue;
            }

            if zone.gust.advance(dt) {
                crate::log(&format!(
                    "Gust '{}' {}",
                    zone.id,
                    if zone.gust.active { "on" } else { "off" }
                ));
            }
        }
    }

    /// Применить currents к игроку. Возвращает приложенную силу (после grounded scale).
    ///
    /// Ramps обновляются всегда, даже если сила потом не применяется (dash / grounded).
    pub fn apply_to_player(
        &mut self,
        player: &mut PlayerKinematics,
        dt: f32,
        is_grounded: bool,
        is_dashing: bool,
    ) -> Vec2 {
        // 1. Ramps
        self.update_ramps(&player.aabb());

        // 2-3. Overrides
        if is_dashing && self.config.dash_overrides_current {
            return Vec2::ZERO;
        }
        if is_grounded && !self.config.affects_grounded {
            return Vec2::ZERO;
        }

        // 4-5. Сила в центре игрока
        let mut force = self.get_force_at(player.position);
        if is_grounded {
            force *= self.config.grounded_multiplier;
        }

        // 6. Integrate
        let previous_speed = player.velocity.length();
        player.velocity += force * dt;

        // 7. Asymmetric clamp: currents разгоняют только до cap и никогда не
        // срезают скорость, полученную из других источников (jump, dash)
        let new_speed = player.velocity.length();
        let max_speed = self.config.max_current_velocity;
        if new_speed > max_speed && new_speed > previous_speed {
            player.velocity *= max_speed.max(previous_speed) / new_speed;
        }

        force
    }

    fn update_ramps(&mut self, player_aabb: &Rect) {
        let rate = self.config.ramp_up_rate;

        for zone in &self.zones {
            let engaged = zone.active && zone.overlaps(player_aabb);
            let ramp = self.ramps.entry(zone.id.clone()).or_insert(0.0);
            *ramp = if engaged {
                (*ramp + rate).min(1.0)
            } else {
                (*ramp - rate).max(0.0)
            };
        }
    }

    /// Суммарная сила в точке: Σ direction · effective · multiplier · ramp
    pub fn get_force_at(&self, point: Vec2) -> Vec2 {
        let multiplier = self.config.global_strength_multiplier;

        self.zones
            .iter()
            .filter(|zone| zone.active && zone.contains(point))
            .map(|zone| {
                zone.force_direction_at(point) * zone.effective_strength() * multiplier * self.ramp(&zone.id)
            })
            .sum()
    }

    /// Active зоны, пересекающие AABB
    pub fn get_overlapping_zones(&self, aabb: &Rect) -> Vec<&CurrentZone> {
        self.zones
            .iter()
            .filter(|zone| zone.active && zone.overlaps(aabb))
            .collect()
    }
}

impl Default for DirectionalFieldSystem {
    fn default() -> Self {
        Self::new(CurrentConfig::default())
    }
}
