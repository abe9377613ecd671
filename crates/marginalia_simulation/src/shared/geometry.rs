//! 2D геометрия traversal слоя
//!
//! Screen space: X вправо, Y вниз. Rect - bevy::math::Rect (min/max corners).

use bevy::math::Rect;
use bevy::prelude::*;

/// Rect из (x, y, width, height) - формат level data
pub fn rect_xywh(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, x + width, y + height)
}

/// Строгое пересечение AABB (касание краями не считается)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Единичный касательный вектор вокруг центра вращения
///
/// clockwise: (ny, −nx), counter-clockwise: (−ny, nx), где n - unit radial
/// от `center` к `point`. Ближе 1px к центру → straight up (0, −1).
pub fn tangent_around(center: Vec2, point: Vec2, clockwise: bool) -> Vec2 {
    let radial = point - center;
    let distance = radial.length();
    if distance < 1.0 {
        return Vec2::NEG_Y;
    }

    let n = radial / distance;
    if clockwise {
        Vec2::new(n.y, -n.x)
    } else {
        Vec2::new(-n.y, n.x)
    }
}

/// Точка на окружности маятника: angle 0 = прямо вниз, положительный = вправо
pub fn pendulum_offset(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.sin() * length, angle.cos() * length)
}

/// Квадратичная bezier кривая, `segments + 1` точек
pub fn sample_quadratic_bezier(from: Vec2, control: Vec2, to: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}
