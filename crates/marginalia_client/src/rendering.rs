use bevy::prelude::*;
use marginalia_simulation::shared::sample_quadratic_bezier;
use marginalia_simulation::{DrawCommand, DrawList, MotionMode, PlayerKinematics, SolidRects};

/// Сегментов на quadratic bezier (верёвки)
const BEZIER_SEGMENTS: usize = 12;
/// Размер пула debug labels (Text2d)
const LABEL_POOL: usize = 16;

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.93, 0.9, 0.82)))
            .add_systems(Startup, spawn_label_pool)
            .add_systems(
                Update,
                (
                    spawn_visuals_for_new_entities,
                    sync_transforms,
                    draw_solids,
                    replay_draw_list,
                    sync_debug_labels,
                )
                    .chain(),
            );
    }
}

/// Simulation space (Y вниз) → world space Bevy (Y вверх)
pub fn to_world(position: Vec2) -> Vec2 {
    Vec2::new(position.x, -position.y)
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Text2d из пула для DrawCommand::Text
#[derive(Component)]
pub struct DebugLabel {
    pub slot: usize,
}

/// Spawn sprite игрока для новых simulation entities
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &PlayerKinematics), With<NeedsVisual>>,
) {
    for (sim_entity, kinematics) in query.iter() {
        let visual_entity = commands
            .spawn((
                Sprite {
                    color: mode_color(&MotionMode::Normal),
                    custom_size: Some(kinematics.size),
                    ..default()
                },
                Transform::from_translation(to_world(kinematics.position).extend(1.0)),
                VisualOf(sim_entity),
            ))
            .id();

        commands
            .entity(sim_entity)
            .remove::<NeedsVisual>()
            .insert(HasVisual(visual_entity));
    }
}

/// Sync PlayerKinematics → sprite transform, MotionMode → цвет
fn sync_transforms(
    sim_query: Query<(&PlayerKinematics, &MotionMode, &HasVisual)>,
    mut visual_query: Query<(&mut Transform, &mut Sprite), With<VisualOf>>,
) {
    for (kinematics, mode, has_visual) in sim_query.iter() {
        if let Ok((mut transform, mut sprite)) = visual_query.get_mut(has_visual.0) {
            transform.translation = to_world(kinematics.position).extend(1.0);
            sprite.color = mode_color(mode);
        }
    }
}

/// Solid rects (stand-in tilemap)
fn draw_solids(solids: Res<SolidRects>, mut gizmos: Gizmos) {
    for solid in solids.0.iter() {
        gizmos.rect_2d(to_world(solid.center()), solid.size(), Color::srgb(0.35, 0.3, 0.25));
    }
}

/// DrawList → gizmos (text обрабатывает sync_debug_labels)
fn replay_draw_list(draw: Res<DrawList>, mut gizmos: Gizmos) {
    for command in draw.commands() {
        match command {
            DrawCommand::Line { from, to, color } => {
                gizmos.line_2d(to_world(*from), to_world(*to), *color);
            }
            DrawCommand::Polyline { points, color } => {
                gizmos.linestrip_2d(points.iter().map(|point| to_world(*point)), *color);
            }
            DrawCommand::QuadraticBezier { from, control, to, color } => {
                let points = sample_quadratic_bezier(*from, *control, *to, BEZIER_SEGMENTS);
                gizmos.linestrip_2d(points.into_iter().map(to_world), *color);
            }
            DrawCommand::Circle { center, radius, color } => {
                gizmos.circle_2d(to_world(*center), *radius, *color);
            }
            DrawCommand::RectOutline { rect, color } => {
                gizmos.rect_2d(to_world(rect.center()), rect.size(), *color);
            }
            DrawCommand::Text { .. } => {}
        }
    }
}

fn spawn_label_pool(mut commands: Commands) {
    for slot in 0..LABEL_POOL {
        commands.spawn((
            Text2d::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_xyz(0.0, 0.0, 10.0),
            Visibility::Hidden,
            DebugLabel { slot },
        ));
    }
}

/// DrawCommand::Text → labels из пула; лишние прячутся
fn sync_debug_labels(
    draw: Res<DrawList>,
    mut labels: Query<(&DebugLabel, &mut Text2d, &mut TextColor, &mut Transform, &mut Visibility)>,
) {
    let texts: Vec<(Vec2, &String, Color)> = draw
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { position, text, color } => Some((*position, text, *color)),
            _ => None,
        })
        .collect();

    for (label, mut text, mut text_color, mut transform, mut visibility) in labels.iter_mut() {
        match texts.get(label.slot) {
            Some((position, content, color)) => {
                if text.0 != **content {
                    text.0 = (*content).clone();
                }
                text_color.0 = *color;
                let world = to_world(*position);
                transform.translation.x = world.x;
                transform.translation.y = world.y;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn mode_color(mode: &MotionMode) -> Color {
    match mode {
        MotionMode::Normal => Color::srgb(0.15, 0.15, 0.2),
        MotionMode::Swinging { .. } => Color::srgb(0.55, 0.2, 0.25),
    }
}
