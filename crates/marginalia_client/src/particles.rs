use bevy::prelude::*;
use marginalia_simulation::{DeterministicRng, ParticleBurst};
use rand::Rng;

use crate::rendering::to_world;

/// Лимит живых частиц (старые bursts не копятся при низком FPS)
const MAX_PARTICLES: usize = 600;

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Particles>()
            .add_systems(Update, (spawn_from_bursts, update_particles, draw_particles).chain());
    }
}

#[derive(Debug, Clone)]
struct Particle {
    /// Simulation space
    position: Vec2,
    velocity: Vec2,
    life: f32,
    max_life: f32,
    size: f32,
    color: Color,
    gravity: f32,
}

/// Живые частицы currents (только визуал, на физику не влияют)
#[derive(Resource, Default)]
struct Particles(Vec<Particle>);

fn spawn_from_bursts(
    mut bursts: EventReader<ParticleBurst>,
    mut particles: ResMut<Particles>,
    mut rng: ResMut<DeterministicRng>,
) {
    for ParticleBurst(spec) in bursts.read() {
        for _ in 0..spec.count {
            if particles.0.len() >= MAX_PARTICLES {
                return;
            }

            let angle = sample(&mut rng.rng, &spec.angle);
            let speed = sample(&mut rng.rng, &spec.speed);
            let life = sample(&mut rng.rng, &spec.life);
            let color = if spec.palette.is_empty() {
                Color::WHITE
            } else {
                spec.palette[rng.rng.gen_range(0..spec.palette.len())]
            };

            particles.0.push(Particle {
                position: spec.position,
                velocity: Vec2::from_angle(angle) * speed,
                life,
                max_life: life.max(f32::EPSILON),
                size: sample(&mut rng.rng, &spec.size),
                color,
                gravity: spec.gravity,
            });
        }
    }
}

/// Пустой range → start (gen_range паникует на пустом диапазоне)
fn sample(rng: &mut impl Rng, range: &std::ops::Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

fn update_particles(mut particles: ResMut<Particles>, time: Res<Time>) {
    let delta = time.delta_secs();

    particles.0.retain_mut(|particle| {
        particle.life -= delta;
        particle.velocity.y += particle.gravity * delta;
        particle.position += particle.velocity * delta;
        particle.life > 0.0
    });
}

fn draw_particles(particles: Res<Particles>, mut gizmos: Gizmos) {
    for particle in particles.0.iter() {
        let alpha = (particle.life / particle.max_life).clamp(0.0, 1.0);
        gizmos.circle_2d(to_world(particle.position), particle.size, particle.color.with_alpha(alpha));
    }
}
