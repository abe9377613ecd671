use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use marginalia_simulation::{Player, PlayerKinematics, ViewportRect};

use crate::rendering::to_world;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, (follow_player, update_viewport_rect).chain());
    }
}

#[derive(Component)]
pub struct FollowCamera {
    /// Доля оставшегося расстояния, проходимая за секунду (экспоненциальное сглаживание)
    pub smoothing: f32,
    /// Точка, за которой следит камера (simulation space)
    pub focus: Vec2,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            smoothing: 6.0,
            focus: Vec2::ZERO,
        }
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, FollowCamera::default()));
}

/// Камера догоняет игрока
fn follow_player(
    player: Query<&PlayerKinematics, With<Player>>,
    mut camera: Query<(&mut FollowCamera, &mut Transform)>,
    time: Res<Time>,
) {
    let Ok(kinematics) = player.single() else {
        return;
    };
    let Ok((mut follow, mut transform)) = camera.single_mut() else {
        return;
    };

    let t = (follow.smoothing * time.delta_secs()).min(1.0);
    follow.focus = follow.focus.lerp(kinematics.position, t);

    let world = to_world(follow.focus);
    transform.translation.x = world.x;
    transform.translation.y = world.y;
}

/// Видимая область в simulation space (для culling flow lines и particles)
fn update_viewport_rect(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<&FollowCamera>,
    mut viewport: ResMut<ViewportRect>,
) {
    let (Ok(window), Ok(follow)) = (windows.single(), camera.single()) else {
        return;
    };

    viewport.0 = Rect::from_center_size(follow.focus, window.size());
}
