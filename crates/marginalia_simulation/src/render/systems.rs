//! Render collection (Update)
//!
//! Физика уже отработала в FixedUpdate; здесь только собираем DrawList
//! для host renderer.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::current::DirectionalFieldSystem;
use crate::vine::PendulumTraversal;

use super::DrawList;

/// Viewport камеры в world space (host обновляет каждый frame)
///
/// Используется для culling flow lines и particles.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect(pub Rect);

impl Default for ViewportRect {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 1920.0, 1080.0))
    }
}

/// Debug overlay toggle (zone outlines, ω/L readout)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DebugOverlay {
    pub enabled: bool,
}

/// System: DrawList текущего frame
///
/// Порядок: flow (фон) → vines → debug поверх.
pub fn collect_traversal_draws_system(
    mut draw: ResMut<DrawList>,
    field: Res<DirectionalFieldSystem>,
    traversal: Res<PendulumTraversal>,
    viewport: Res<ViewportRect>,
    debug: Res<DebugOverlay>,
    time: Res<Time>,
) {
    let elapsed = time.elapsed_secs();

    draw.clear();
    field.render_flow(&mut draw, viewport.0, elapsed);
    traversal.render(&mut draw, elapsed, debug.enabled);
    if debug.enabled {
        field.render_debug(&mut draw);
    }
}
