/// Backdrop of point stars in a spherical shell around the scene.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use orrery_engine::{Color, EngineContext, Entity, EntityId, LocalTransform, PointsComponent};

pub const INNER_RADIUS: f32 = 25.0;
pub const SHELL_DEPTH: f32 = 25.0;
const STAR_HUE: f32 = 0.6;
const STAR_SATURATION: f32 = 0.2;

/// Uniform direction on the sphere at a random radius in the shell.
pub fn random_star<R: Rng>(rng: &mut R) -> Vec3 {
    let radius = rng.random::<f32>() * SHELL_DEPTH + INNER_RADIUS;
    let theta = TAU * rng.random::<f32>();
    let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

pub fn generate_stars<R: Rng>(rng: &mut R, count: usize, size: f32) -> PointsComponent {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push(random_star(rng));
        colors.push(Color::from_hsl(STAR_HUE, STAR_SATURATION, rng.random()));
    }
    PointsComponent::new(positions, colors, size)
}

pub fn spawn_starfield<R: Rng>(ctx: &mut EngineContext, rng: &mut R, count: usize, size: f32) -> EntityId {
    let texture = ctx.textures.get("circle");
    let points = generate_stars(rng, count, size).with_texture(texture);
    let id = ctx.next_id();
    log::debug!("starfield: {} stars", points.len());
    ctx.spawn(Entity::new(id).with_tag("starfield").with_points(points), LocalTransform::new())
}
