//! Visual feedback для vines
//!
//! Всё - чистая функция от (state, elapsed): frame-rate independent.
//! - anchors (active / inactive)
//! - idle sway незанятых vines (seeded фаза + непрерывное время)
//! - активная верёвка: bezier с провисанием пока |ω| < sag_angular_speed
//! - swing-arc preview по энергии маятника
//! - debug readout ω / L

use bevy::color::{Alpha, Color};
use bevy::prelude::*;

use crate::render::DrawList;
use crate::shared::pendulum_offset;

use super::PendulumTraversal;

const ANCHOR_RADIUS: f32 = 5.0;
/// Idle vine висит на эту долю своей rope_length
const IDLE_HANG_FRACTION: f32 = 0.45;
/// Амплитуда idle sway (rad)
const IDLE_SWAY_AMPLITUDE: f32 = 0.12;
/// Угловая частота idle sway (rad/s)
const IDLE_SWAY_SPEED: f32 = 1.3;
/// Максимальное провисание (доля длины верёвки) при ω = 0
const MAX_SAG_FRACTION: f32 = 0.18;
const ARC_SEGMENTS: usize = 24;

impl PendulumTraversal {
    pub fn render(&self, draw: &mut DrawList, elapsed: f32, show_debug: bool) {
        for (index, anchor) in self.anchors().iter().enumerate() {
            let anchor_color = if anchor.active {
                Color::srgb(0.9, 0.85, 0.6)
            } else {
                Color::srgba(0.5, 0.5, 0.5, 0.5)
            };
            draw.circle(anchor.position, ANCHOR_RADIUS, anchor_color);

            if !anchor.active || (self.is_swinging() && self.active_vine() == Some(index)) {
                continue;
            }

            // Idle decorative sway
            let phase = self.sway_phases.get(index).copied().unwrap_or(0.0);
            let sway = (elapsed * IDLE_SWAY_SPEED + phase).sin() * IDLE_SWAY_AMPLITUDE;
            let hang = anchor.rope_length * IDLE_HANG_FRACTION;
            let end = anchor.position + pendulum_offset(sway, hang);
            // Середина отстаёт от конца → лёгкий изгиб
            let control = anchor.position + pendulum_offset(sway * 0.5, hang * 0.5);
            draw.bezier(anchor.position, control, end, anchor.kind.rope_color());
        }

        if let Some(anchor) = self.active_anchor().filter(|_| self.is_swinging()) {
            self.render_active_rope(draw, anchor.position, anchor.kind.rope_color());
            self.render_swing_arc(draw, anchor.position);

            if show_debug {
                draw.text(
                    anchor.position + Vec2::new(10.0, -12.0),
                    format!("ω={:.2} L={:.0}", self.angular_velocity(), self.current_rope_length()),
                    Color::WHITE,
                );
            }
        }
    }

    fn render_active_rope(&self, draw: &mut DrawList, anchor: Vec2, color: Color) {
        let end = self.swing_position();
        let sag_speed = self.config().sag_angular_speed;
        let speed = self.angular_velocity().abs();

        if sag_speed > 0.0 && speed < sag_speed {
            let slack = 1.0 - speed / sag_speed;
            let sag = self.current_rope_length() * MAX_SAG_FRACTION * slack;
            let control = anchor.lerp(end, 0.5) + Vec2::new(0.0, sag);
            draw.bezier(anchor, control, end, color);
        } else {
            draw.line(anchor, end, color);
        }
    }

    /// Preview дуги, которую маятник пройдёт без pump
    ///
    /// Энергия: cos θmax = cos θ − ω²L / (2g). Выше горизонта - ограничиваем π.
    fn render_swing_arc(&self, draw: &mut DrawList, anchor: Vec2) {
        let gravity = self.config().gravity;
        if gravity <= 0.0 {
            return;
        }

        let length = self.current_rope_length();
        let omega = self.angular_velocity();
        let cos_max = self.angle().cos() - omega * omega * length / (2.0 * gravity);
        let amplitude = cos_max.clamp(-1.0, 1.0).acos();
        if amplitude < 0.01 {
            return;
        }

        let points = (0..=ARC_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ARC_SEGMENTS as f32;
                let angle = -amplitude + 2.0 * amplitude * t;
                anchor + pendulum_offset(angle, length)
            })
            .collect();
        draw.polyline(points, Color::WHITE.with_alpha(0.2));
    }
}
