//! Current particles
//!
//! Симуляция частиц - забота host (particle system). Здесь только cadence:
//! каждые `particle_interval` секунд для каждой видимой зоны в sink уходит
//! один ParticleSpec.

use std::ops::Range;

use bevy::color::Color;
use bevy::math::Rect;
use bevy::prelude::*;
use rand::Rng;

use crate::shared::rects_overlap;

use super::{CurrentKind, CurrentZone, DirectionalFieldSystem, ParticleBurst};

/// Максимум bursts за один вызов (после долгого frame не засыпаем экран)
const MAX_BURSTS_PER_CALL: u32 = 3;
/// Разброс угла вокруг направления потока (rad)
const ANGLE_SPREAD: f32 = 0.25;

/// Параметры одного emit (формат внешнего particle system)
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpec {
    pub position: Vec2,
    pub count: u32,
    /// px/s
    pub speed: Range<f32>,
    /// rad, screen space (0 = вправо, π/2 = вниз)
    pub angle: Range<f32>,
    /// секунды
    pub life: Range<f32>,
    /// px
    pub size: Range<f32>,
    pub palette: Vec<Color>,
    pub gravity: f32,
}

/// Куда уходят particle specs
pub trait ParticleSink {
    fn emit(&mut self, spec: ParticleSpec);
}

impl ParticleSink for Vec<ParticleSpec> {
    fn emit(&mut self, spec: ParticleSpec) {
        self.push(spec);
    }
}

impl ParticleSink for EventWriter<'_, ParticleBurst> {
    fn emit(&mut self, spec: ParticleSpec) {
        self.write(ParticleBurst(spec));
    }
}

fn stream_palette(kind: CurrentKind) -> Vec<Color> {
    match kind {
        CurrentKind::Jet => vec![Color::srgb(1.0, 1.0, 1.0), Color::srgb(0.7, 0.95, 1.0)],
        CurrentKind::Gust => vec![Color::srgba(0.9, 0.92, 0.95, 0.8), Color::srgba(0.75, 0.8, 0.85, 0.6)],
        CurrentKind::Whirlpool => vec![Color::srgb(0.3, 0.5, 0.85), Color::srgb(0.45, 0.65, 0.95)],
        CurrentKind::Stream => vec![Color::srgb(0.4, 0.6, 0.9), Color::srgb(0.55, 0.75, 0.95)],
    }
}

impl DirectionalFieldSystem {
    /// Particle cadence: накопитель dt, burst каждые `particle_interval` секунд
    ///
    /// Пропускаются off-screen, inactive и полностью заглушённые (effective = 0) зоны.
    pub fn update_particles<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        viewport: Rect,
        rng: &mut R,
        sink: &mut impl ParticleSink,
    ) {
        let interval = self.config().particle_interval;
        if interval <= 0.0 {
            return;
        }

        self.particle_accumulator += dt;

        let mut bursts = 0;
        while self.particle_accumulator >= interval && bursts < MAX_BURSTS_PER_CALL {
            self.particle_accumulator -= interval;
            bursts += 1;

            for zone in self.zones() {
                if let Some(spec) = self.burst_for_zone(zone, &viewport, rng) {
                    sink.emit(spec);
                }
            }
        }

        // Лишнее после cap выбрасываем
        self.particle_accumulator = self.particle_accumulator.min(interval);
    }

    fn burst_for_zone<R: Rng + ?Sized>(&self, zone: &CurrentZone, viewport: &Rect, rng: &mut R) -> Option<ParticleSpec> {
        if !zone.active || !rects_overlap(&zone.rect, viewport) {
            return None;
        }

        let effective = zone.effective_strength() * self.config().global_strength_multiplier;
        if effective <= 0.0 {
            return None;
        }

        // Spawn внутри видимой части зоны
        let visible = zone.rect.intersect(*viewport);
        let position = Vec2::new(
            rng.gen_range(visible.min.x..=visible.max.x),
            rng.gen_range(visible.min.y..=visible.max.y),
        );

        let direction = zone.force_direction_at(position);
        let heading = if direction == Vec2::ZERO {
            0.0
        } else {
            direction.y.atan2(direction.x)
        };

        let base_count = self.config().particles_per_burst;
        let (count, speed_scale) = match zone.kind {
            CurrentKind::Jet => (base_count * 2, 0.6),
            _ => (base_count, 0.35),
        };

        Some(ParticleSpec {
            position,
            count,
            speed: (effective * speed_scale * 0.5)..(effective * speed_scale),
            angle: (heading - ANGLE_SPREAD)..(heading + ANGLE_SPREAD),
            life: 0.4..0.9,
            size: 1.5..3.5,
            palette: stream_palette(zone.kind),
            gravity: 0.0,
        })
    }
}
