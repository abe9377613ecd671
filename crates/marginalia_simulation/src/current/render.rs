//! Visual feedback для currents
//!
//! render_flow - анимированные streaks со стрелками (stream / gust / jet) или
//! вращающаяся спираль (whirlpool). Фазы streaks сидятся от id зоны, анимация -
//! чистая функция от elapsed, так что layout одинаковый между reload'ами.
//!
//! render_debug - outline зоны, effective strength числом, стрелка направления.

use bevy::color::{Alpha, Color};
use bevy::math::Rect;
use bevy::prelude::*;
use rand::Rng;

use crate::render::DrawList;
use crate::shared::{rects_overlap, seeded_rng};

use super::{CurrentKind, CurrentZone, DirectionalFieldSystem};

/// Salt для flow-line seeds (отдельный поток от vine sway)
const FLOW_SEED_SALT: u64 = 0xF10_0001;
/// Плотность streaks: один на столько px² площади зоны
const STREAK_AREA: f32 = 9000.0;
const MIN_STREAKS: usize = 3;
const MAX_STREAKS: usize = 24;
const STREAK_LENGTH: f32 = 28.0;
const ARROW_HEAD: f32 = 6.0;
/// Сколько px streak проходит в секунду на единицу strength
const STREAK_SPEED_SCALE: f32 = 0.25;

const SPIRAL_ARMS: usize = 3;
const SPIRAL_SEGMENTS: usize = 16;
/// Полных оборотов спирали от центра к краю
const SPIRAL_TURNS: f32 = 0.75;
/// rad/s на единицу strength
const SPIRAL_SPIN_SCALE: f32 = 0.004;

fn flow_color(kind: CurrentKind) -> Color {
    match kind {
        CurrentKind::Stream => Color::srgb(0.45, 0.65, 0.95),
        CurrentKind::Jet => Color::srgb(0.85, 0.95, 1.0),
        CurrentKind::Gust => Color::srgb(0.85, 0.88, 0.92),
        CurrentKind::Whirlpool => Color::srgb(0.3, 0.5, 0.9),
    }
}

impl DirectionalFieldSystem {
    /// Flow lines для видимых active зон
    pub fn render_flow(&self, draw: &mut DrawList, viewport: Rect, elapsed: f32) {
        for zone in self.zones() {
            if !zone.active || zone.strength <= 0.0 || !rects_overlap(&zone.rect, &viewport) {
                continue;
            }

            let opacity = (zone.effective_strength() / zone.strength).clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }
            let color = flow_color(zone.kind).with_alpha(0.25 + 0.55 * opacity);

            match zone.kind {
                CurrentKind::Whirlpool => render_spiral(draw, zone, elapsed, color),
                _ => render_streaks(draw, zone, elapsed, color),
            }
        }
    }

    /// Debug overlay: outline, "{kind} {effective}", стрелка направления
    pub fn render_debug(&self, draw: &mut DrawList) {
        for zone in self.zones() {
            let outline = if zone.active {
                flow_color(zone.kind)
            } else {
                Color::srgba(0.5, 0.5, 0.5, 0.6)
            };
            draw.rect_outline(zone.rect, outline);

            let effective = zone.effective_strength() * self.config().global_strength_multiplier;
            draw.text(
                zone.rect.min + Vec2::new(4.0, 4.0),
                format!("{} {:.0}", zone.kind.as_str(), effective),
                Color::WHITE,
            );

            // Whirlpool: стрелка вдоль касательной в верхней точке окружности
            let center = zone.rect.center();
            let (from, direction) = match zone.kind {
                CurrentKind::Whirlpool => {
                    let top = center - Vec2::new(0.0, zone.rect.half_size().y * 0.5);
                    (top, zone.force_direction_at(top))
                }
                _ => (center, zone.unit_direction()),
            };
            if direction != Vec2::ZERO {
                let length = zone.rect.size().min_element() * 0.3;
                draw.arrow(from, from + direction * length, ARROW_HEAD * 1.5, Color::WHITE);
            }
        }
    }
}

fn render_streaks(draw: &mut DrawList, zone: &CurrentZone, elapsed: f32, color: Color) {
    let direction = zone.unit_direction();
    if direction == Vec2::ZERO {
        return;
    }

    let rect = zone.rect;
    let size = rect.size();
    let count = ((size.x * size.y / STREAK_AREA) as usize).clamp(MIN_STREAKS, MAX_STREAKS);

    // Длина пробега streak вдоль direction через rect
    let travel = (size.x * direction.x.abs() + size.y * direction.y.abs()).max(1.0);
    let speed = zone.effective_strength().max(zone.strength * 0.1) * STREAK_SPEED_SCALE;

    let mut rng = seeded_rng(&zone.id, FLOW_SEED_SALT);
    for _ in 0..count {
        let lane = Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        let phase: f32 = rng.gen_range(0.0..travel);

        let offset = (phase + elapsed * speed).rem_euclid(travel);
        let base = rect.min + lane * size;
        let head = wrap_into(rect, base + direction * offset);
        // Хвост у края зоны укорачивается, за границу не вылезает
        let tail = (head - direction * STREAK_LENGTH).clamp(rect.min, rect.max);

        draw.arrow(tail, head, ARROW_HEAD, color);
    }
}

/// Заворачивает точку обратно в rect (тороидально)
fn wrap_into(rect: Rect, point: Vec2) -> Vec2 {
    let size = rect.size().max(Vec2::ONE);
    rect.min + (point - rect.min).rem_euclid(size)
}

fn render_spiral(draw: &mut DrawList, zone: &CurrentZone, elapsed: f32, color: Color) {
    let center = zone.rect.center();
    let radius = zone.rect.half_size().min_element();
    if radius <= 1.0 {
        return;
    }

    // Экран Y вниз: положительный угол визуально по часовой
    let spin_sign = if zone.clockwise { 1.0 } else { -1.0 };
    let spin = elapsed * zone.effective_strength() * SPIRAL_SPIN_SCALE * spin_sign;
    let sweep = SPIRAL_TURNS * std::f32::consts::TAU * -spin_sign;

    for arm in 0..SPIRAL_ARMS {
        let start = spin + arm as f32 * std::f32::consts::TAU / SPIRAL_ARMS as f32;
        let points = (0..=SPIRAL_SEGMENTS)
            .map(|i| {
                let t = i as f32 / SPIRAL_SEGMENTS as f32;
                let angle = start + sweep * t;
                center + Vec2::new(angle.cos(), angle.sin()) * radius * (0.15 + 0.85 * t)
            })
            .collect();
        draw.polyline(points, color);
    }
}
