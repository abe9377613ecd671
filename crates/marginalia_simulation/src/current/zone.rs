//! CurrentZone - статичная область силы (water / air current)
//!
//! Stream / jet: постоянная сила вдоль `direction`.
//! Gust: та же сила, но с on/off duty cycle (GustCycle живёт прямо в зоне).
//! Whirlpool: касательная вокруг центра rect, `direction` игнорируется.

use bevy::math::Rect;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::{rect_xywh, rects_overlap, tangent_around};

/// Последние секунды off-фазы gust, когда сила начинает нарастать (предупреждение)
pub const GUST_TELEGRAPH_TIME: f32 = 0.3;
/// Доля полной силы в конце telegraph окна
pub const GUST_TELEGRAPH_STRENGTH: f32 = 0.15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum CurrentKind {
    #[default]
    Stream,
    Jet,
    Gust,
    Whirlpool,
}

impl CurrentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentKind::Stream => "stream",
            CurrentKind::Jet => "jet",
            CurrentKind::Gust => "gust",
            CurrentKind::Whirlpool => "whirlpool",
        }
    }
}

/// Duty cycle gust зоны
///
/// `active` переключается каждые `on_duration` / `off_duration` секунд,
/// timer сбрасывается в 0 при каждом переключении.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct GustCycle {
    pub on_duration: f32,
    pub off_duration: f32,
    #[serde(skip)]
    pub timer: f32,
    /// Стартовая фаза (по умолчанию gust сразу дует)
    pub active: bool,
}

impl Default for GustCycle {
    fn default() -> Self {
        Self {
            on_duration: 2.0,
            off_duration: 1.5,
            timer: 0.0,
            active: true,
        }
    }
}

impl GustCycle {
    pub fn new(on_duration: f32, off_duration: f32) -> Self {
        Self {
            on_duration,
            off_duration,
            ..default()
        }
    }

    /// Продвинуть timer. Возвращает true если фаза переключилась.
    ///
    /// Максимум одно переключение за вызов (остаток dt не переносится).
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;

        let phase_duration = if self.active {
            self.on_duration
        } else {
            self.off_duration
        };

        if self.timer >= phase_duration {
            self.active = !self.active;
            self.timer = 0.0;
            return true;
        }

        false
    }

    /// Множитель силы [0, 1] для текущей фазы
    ///
    /// On: 1. Off: 0, кроме последних GUST_TELEGRAPH_TIME секунд, где линейно 0 → 0.15.
    pub fn strength_factor(&self) -> f32 {
        if self.active {
            return 1.0;
        }

        let remaining = (self.off_duration - self.timer).max(0.0);
        if remaining <= GUST_TELEGRAPH_TIME {
            GUST_TELEGRAPH_STRENGTH * (1.0 - remaining / GUST_TELEGRAPH_TIME)
        } else {
            0.0
        }
    }

    /// Доля прогресса текущей фазы [0, 1] (для визуала)
    pub fn phase_progress(&self) -> f32 {
        let duration = if self.active {
            self.on_duration
        } else {
            self.off_duration
        };
        if duration <= 0.0 {
            return 1.0;
        }
        (self.timer / duration).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct CurrentZone {
    /// Stable id (ключ ramp + seed flow lines)
    pub id: String,
    /// В level data: [x, y, width, height]
    #[serde(with = "rect_as_xywh")]
    pub rect: Rect,
    /// Направление силы (нормализуется при использовании, whirlpool игнорирует)
    #[serde(default)]
    pub direction: Vec2,
    /// Сила (px/s²)
    pub strength: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub kind: CurrentKind,
    /// Только для whirlpool
    #[serde(default)]
    pub clockwise: bool,
    /// Только для gust
    #[serde(default)]
    pub gust: GustCycle,
}

fn default_active() -> bool {
    true
}

impl CurrentZone {
    fn with_kind(id: impl Into<String>, rect: Rect, direction: Vec2, strength: f32, kind: CurrentKind) -> Self {
        Self {
            id: id.into(),
            rect,
            direction,
            strength,
            active: true,
            kind,
            clockwise: false,
            gust: GustCycle::default(),
        }
    }

    pub fn stream(id: impl Into<String>, rect: Rect, direction: Vec2, strength: f32) -> Self {
        Self::with_kind(id, rect, direction, strength, CurrentKind::Stream)
    }

    pub fn jet(id: impl Into<String>, rect: Rect, direction: Vec2, strength: f32) -> Self {
        Self::with_kind(id, rect, direction, strength, CurrentKind::Jet)
    }

    pub fn gust(
        id: impl Into<String>,
        rect: Rect,
        direction: Vec2,
        strength: f32,
        on_duration: f32,
        off_duration: f32,
    ) -> Self {
        Self {
            gust: GustCycle::new(on_duration, off_duration),
            ..Self::with_kind(id, rect, direction, strength, CurrentKind::Gust)
        }
    }

    pub fn whirlpool(id: impl Into<String>, rect: Rect, strength: f32, clockwise: bool) -> Self {
        Self {
            clockwise,
            ..Self::with_kind(id, rect, Vec2::ZERO, strength, CurrentKind::Whirlpool)
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Единичный direction; нулевой вектор → (0, 0), не NaN
    pub fn unit_direction(&self) -> Vec2 {
        self.direction.normalize_or_zero()
    }

    /// Сила после gating по времени (gust duty cycle), до multiplier и ramp
    pub fn effective_strength(&self) -> f32 {
        match self.kind {
            CurrentKind::Gust => self.strength * self.gust.strength_factor(),
            _ => self.strength,
        }
    }

    /// Единичное направление силы в точке
    pub fn force_direction_at(&self, point: Vec2) -> Vec2 {
        match self.kind {
            CurrentKind::Whirlpool => tangent_around(self.rect.center(), point, self.clockwise),
            _ => self.unit_direction(),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn overlaps(&self, aabb: &Rect) -> bool {
        rects_overlap(&self.rect, aabb)
    }
}

/// Rect ↔ [x, y, width, height] для level data
mod rect_as_xywh {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rect: &Rect, serializer: S) -> Result<S::Ok, S::Error> {
        let size = rect.size();
        [rect.min.x, rect.min.y, size.x, size.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rect, D::Error> {
        let [x, y, width, height] = <[f32; 4]>::deserialize(deserializer)?;
        Ok(rect_xywh(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gust_scenario_flip_at_on_duration() {
        let mut gust = GustCycle::new(2.0, 1.5);

        // 0.25 точно представимо → 8 шагов = ровно 2.0
        for _ in 0..7 {
            assert!(!gust.advance(0.25));
            assert!(gust.active);
            assert_eq!(gust.strength_factor(), 1.0);
        }

        assert!(gust.advance(0.25));
        assert!(!gust.active);
        assert_eq!(gust.timer, 0.0);
    }

    #[test]
    fn test_gust_telegraph_ramp() {
        let mut gust = GustCycle::new(2.0, 1.5);
        gust.active = false;

        gust.timer = 1.0;
        assert_eq!(gust.strength_factor(), 0.0);

        // 1.2s в off-фазе: осталось 0.3 → ramp начинается с 0
        gust.timer = 1.2;
        assert!(gust.strength_factor().abs() < 1e-5);

        gust.timer = 1.35;
        assert!((gust.strength_factor() - 0.075).abs() < 1e-4);

        gust.timer = 1.5;
        assert!((gust.strength_factor() - GUST_TELEGRAPH_STRENGTH).abs() < 1e-6);
    }

    #[test]
    fn test_gust_off_phase_then_back_on() {
        let mut gust = GustCycle::new(0.5, 0.5);
        assert!(gust.advance(0.5));
        assert!(!gust.active);
        assert!(gust.advance(0.5));
        assert!(gust.active);
    }

    #[test]
    fn test_effective_strength_only_gates_gusts() {
        let rect = rect_xywh(0.0, 0.0, 100.0, 100.0);
        let stream = CurrentZone::stream("s", rect, Vec2::X, 400.0);
        assert_eq!(stream.effective_strength(), 400.0);

        let mut gust = CurrentZone::gust("g", rect, Vec2::X, 400.0, 2.0, 1.5);
        assert_eq!(gust.effective_strength(), 400.0);
        gust.gust.advance(2.0);
        assert_eq!(gust.effective_strength(), 0.0);
    }

    #[test]
    fn test_zero_direction_is_zero_not_nan() {
        let zone = CurrentZone::stream("s", rect_xywh(0.0, 0.0, 10.0, 10.0), Vec2::ZERO, 400.0);
        assert_eq!(zone.unit_direction(), Vec2::ZERO);
        assert_eq!(zone.force_direction_at(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    }

    #[test]
    fn test_whirlpool_scenario_pushes_left() {
        let zone = CurrentZone::whirlpool("w", rect_xywh(800.0, 200.0, 400.0, 400.0), 300.0, true);
        let direction = zone.force_direction_at(Vec2::new(1000.0, 200.0));
        assert!((direction - Vec2::new(-1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_whirlpool_ignores_direction() {
        let mut zone = CurrentZone::whirlpool("w", rect_xywh(0.0, 0.0, 200.0, 200.0), 300.0, false);
        zone.direction = Vec2::X;
        let direction = zone.force_direction_at(Vec2::new(100.0, 0.0));
        // CCW от radial (0, −1) → (1, 0)
        assert!((direction - Vec2::X).length() < 1e-6);
        zone.clockwise = true;
        assert!((zone.force_direction_at(Vec2::new(100.0, 0.0)) - Vec2::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_zone_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            zone: CurrentZone,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [zone]
            id = "updraft"
            rect = [100.0, 50.0, 200.0, 400.0]
            direction = [0.0, -1.0]
            strength = 600.0
            kind = "gust"
            gust = { on_duration = 1.0, off_duration = 2.5 }
            "#,
        )
        .unwrap();

        let zone = wrapper.zone;
        assert_eq!(zone.kind, CurrentKind::Gust);
        assert_eq!(zone.rect, Rect::new(100.0, 50.0, 300.0, 450.0));
        assert!(zone.active);
        assert!(zone.gust.active);
        assert_eq!(zone.gust.timer, 0.0);
        assert_eq!(zone.gust.off_duration, 2.5);
    }
}
