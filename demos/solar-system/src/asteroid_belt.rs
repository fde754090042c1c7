/// Asteroid belt: one instanced layer per loaded rock mesh, scattered around
/// a ring between Mars and Jupiter.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use orrery_engine::{EngineContext, Entity, EntityId, GeometryId, LocalTransform, Material, MeshComponent, Motion};

pub const BELT_DISTANCE: f32 = 2.5;
pub const ROCK_SIZE: f32 = 0.035;
pub const MIN_ROCKS: usize = 25;
/// Each layer gets `MIN_ROCKS` plus up to this many more.
pub const EXTRA_ROCKS: usize = 25;

/// Spin rate of layer `index` about Z. Outer layers in load order turn faster.
pub fn layer_rate(index: usize) -> f32 {
    -0.0002 * ((index + 1) as f32 * 0.1)
}

/// Uniformly distributed random rotation (Shoemake's method).
pub fn random_rotation<R: Rng>(rng: &mut R) -> Quat {
    let u1: f32 = rng.random();
    let u2: f32 = rng.random();
    let u3: f32 = rng.random();
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(
        a * (TAU * u2).sin(),
        a * (TAU * u2).cos(),
        b * (TAU * u3).sin(),
        b * (TAU * u3).cos(),
    )
    .normalize()
}

/// Instance transforms for one layer.
pub fn scatter_rocks<R: Rng>(rng: &mut R, distance: f32, size: f32) -> Vec<Mat4> {
    let count = MIN_ROCKS + (rng.random::<f32>() * EXTRA_ROCKS as f32).floor() as usize;
    let count = count.min(MIN_ROCKS + EXTRA_ROCKS - 1);

    (0..count)
        .map(|_| {
            let radius = distance + rng.random::<f32>() * 0.1 - 0.05;
            let angle = rng.random::<f32>() * TAU;
            let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
            let rotation = random_rotation(rng);
            let scale = size + rng.random::<f32>() * 0.05 - 0.025;
            Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
        })
        .collect()
}

/// Spawn the belt group under `parent`, one layer per rock geometry.
/// Returns the group and its layers.
pub fn spawn_asteroid_belt<R: Rng>(
    ctx: &mut EngineContext,
    parent: EntityId,
    rocks: &[GeometryId],
    rng: &mut R,
) -> (EntityId, Vec<EntityId>) {
    let group = ctx.next_id();
    ctx.spawn_child(Entity::new(group).with_tag("asteroid-belt"), parent, LocalTransform::new());

    let mut layers = Vec::with_capacity(rocks.len());
    let mut total = 0;
    for (index, &geometry) in rocks.iter().enumerate() {
        let instances = scatter_rocks(rng, BELT_DISTANCE, ROCK_SIZE);
        total += instances.len();

        let id = ctx.next_id();
        ctx.spawn_child(
            Entity::new(id)
                .with_tag("asteroids")
                .with_mesh(MeshComponent::new(geometry, Material::standard()).with_instances(instances))
                .with_motion(Motion::spin_z(layer_rate(index))),
            group,
            LocalTransform::new(),
        );
        layers.push(id);
    }

    if layers.is_empty() {
        log::warn!("asteroid belt has no rock meshes");
    } else {
        log::debug!("asteroid belt: {} layers, {} rocks", layers.len(), total);
    }
    (group, layers)
}
