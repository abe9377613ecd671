//! Backend-agnostic draw list
//!
//! Vines и currents не рисуют сами - они пишут DrawCommand'ы в DrawList,
//! host (client gizmos, engine bridge) проигрывает список каждый frame.
//! Координаты в screen space симуляции (Y вниз).

use bevy::color::Color;
use bevy::math::Rect;
use bevy::prelude::*;

pub mod systems;

pub use systems::{collect_traversal_draws_system, DebugOverlay, ViewportRect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Color,
    },
    QuadraticBezier {
        from: Vec2,
        control: Vec2,
        to: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    RectOutline {
        rect: Rect,
        color: Color,
    },
    Text {
        position: Vec2,
        text: String,
        color: Color,
    },
}

/// Draw list текущего frame (resource, очищается перед сбором)
#[derive(Resource, Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.push(DrawCommand::Line { from, to, color });
    }

    /// Линия с наконечником на `to`
    pub fn arrow(&mut self, from: Vec2, to: Vec2, head_length: f32, color: Color) {
        self.line(from, to, color);

        let direction = (to - from).normalize_or_zero();
        if direction == Vec2::ZERO {
            return;
        }
        // Два пера под ±150° от направления
        for angle in [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE] {
            let wing = Vec2::from_angle(angle).rotate(direction) * head_length;
            self.line(to, to + wing, color);
        }
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, color: Color) {
        if points.len() >= 2 {
            self.push(DrawCommand::Polyline { points, color });
        }
    }

    pub fn bezier(&mut self, from: Vec2, control: Vec2, to: Vec2, color: Color) {
        self.push(DrawCommand::QuadraticBezier { from, control, to, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle { center, radius, color });
    }

    pub fn rect_outline(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::RectOutline { rect, color });
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, color: Color) {
        self.push(DrawCommand::Text {
            position,
            text: text.into(),
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

const ARROW_HEAD_ANGLE: f32 = 5.0 * std::f32::consts::PI / 6.0;
