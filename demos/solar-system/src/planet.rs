use glam::{Quat, Vec3};
use orrery_engine::{icosphere, torus};
use orrery_engine::{EngineContext, Entity, EntityId, LocalTransform, Material, MeshComponent, Motion};

use crate::bodies::{MoonSpec, PlanetSpec, RingSpec, MOON_ORBIT_RATE};

/// Spawn a textured planet, plus its ring and moon, under `parent`.
/// The planet starts at angle zero on its orbit.
pub fn spawn_planet(
    ctx: &mut EngineContext,
    parent: EntityId,
    spec: &PlanetSpec,
    distance: f32,
    detail: u32,
) -> EntityId {
    let geometry = ctx.geometries.insert(icosphere(spec.size, detail));
    let texture = texture_or_warn(ctx, spec.texture);

    let id = ctx.next_id();
    ctx.spawn_child(
        Entity::new(id)
            .with_tag(spec.name)
            .with_mesh(MeshComponent::new(geometry, Material::textured(texture))),
        parent,
        LocalTransform::from_translation(Vec3::new(distance, 0.0, 0.0)),
    );

    if let Some(ring) = &spec.ring {
        spawn_ring(ctx, id, spec.name, ring);
    }
    if let Some(moon) = &spec.moon {
        spawn_moon(ctx, id, moon, detail);
    }
    id
}

fn spawn_ring(ctx: &mut EngineContext, planet: EntityId, planet_name: &str, ring: &RingSpec) -> EntityId {
    let geometry = ctx.geometries.insert(torus(
        ring.radius,
        ring.tube,
        ring.radial_segments,
        ring.tubular_segments,
    ));
    let id = ctx.next_id();
    ctx.spawn_child(
        Entity::new(id)
            .with_tag(format!("{}-ring", planet_name))
            .with_mesh(MeshComponent::new(geometry, Material::standard())),
        planet,
        LocalTransform::new()
            .with_rotation(Quat::from_rotation_x(ring.tilt))
            .with_scale(Vec3::new(1.0, 1.0, ring.flatten)),
    )
}

/// The moon hangs off a spinning pivot so it circles the planet.
fn spawn_moon(ctx: &mut EngineContext, planet: EntityId, moon: &MoonSpec, detail: u32) -> EntityId {
    let pivot = ctx.next_id();
    ctx.spawn_child(
        Entity::new(pivot)
            .with_tag(format!("{}-pivot", moon.name))
            .with_motion(Motion::spin_y(MOON_ORBIT_RATE)),
        planet,
        LocalTransform::new(),
    );

    let geometry = ctx.geometries.insert(icosphere(moon.size, detail));
    let texture = texture_or_warn(ctx, moon.texture);
    let id = ctx.next_id();
    ctx.spawn_child(
        Entity::new(id)
            .with_tag(moon.name)
            .with_mesh(MeshComponent::new(geometry, Material::textured(texture))),
        pivot,
        LocalTransform::from_translation(Vec3::new(moon.distance, 0.0, 0.0)),
    )
}

fn texture_or_warn(ctx: &EngineContext, name: &str) -> Option<orrery_engine::TextureId> {
    let texture = ctx.textures.get(name);
    if texture.is_none() && !ctx.textures.is_empty() {
        log::warn!("texture '{}' missing from manifest", name);
    }
    texture
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{DISTANCE_SCALE, EARTH, PLANETS, SATURN};

    fn root(ctx: &mut EngineContext) -> EntityId {
        let id = ctx.next_id();
        ctx.spawn(Entity::new(id), LocalTransform::new())
    }

    #[test]
    fn planet_sits_on_its_orbit() {
        let mut ctx = EngineContext::new();
        let parent = root(&mut ctx);
        let spec = &PLANETS[EARTH];
        let id = spawn_planet(&mut ctx, parent, spec, spec.distance(DISTANCE_SCALE), 2);

        ctx.graph.propagate(&mut ctx.scene);
        let earth = ctx.scene.get(id).unwrap();
        assert_eq!(earth.tag, "Earth");
        assert!((earth.world_position() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);

        let geometry = ctx.geometries.get(earth.mesh.as_ref().unwrap().geometry).unwrap();
        assert!((geometry.bounding_radius() - spec.size).abs() < 1e-4);
    }

    #[test]
    fn moon_follows_planet() {
        let mut ctx = EngineContext::new();
        let parent = root(&mut ctx);
        let spec = &PLANETS[EARTH];
        let earth = spawn_planet(&mut ctx, parent, spec, 3.0, 1);

        ctx.graph.propagate(&mut ctx.scene);
        let moon = ctx.scene.find_by_tag("Moon").unwrap();
        assert!((moon.world_position() - Vec3::new(3.4, 0.0, 0.0)).length() < 1e-5);

        ctx.graph.get_local_mut(earth).unwrap().translation = Vec3::new(0.0, 0.0, 3.0);
        ctx.update_motions(0.1);
        ctx.graph.propagate(&mut ctx.scene);
        let moon = ctx.scene.find_by_tag("Moon").unwrap();
        let offset = moon.world_position() - Vec3::new(0.0, 0.0, 3.0);
        assert!((offset.length() - 0.4).abs() < 1e-5);
        assert!(offset.x < 0.4, "pivot spin moved the moon");
    }

    #[test]
    fn saturn_ring_is_flattened_and_tilted() {
        let mut ctx = EngineContext::new();
        let parent = root(&mut ctx);
        let saturn = spawn_planet(&mut ctx, parent, &PLANETS[SATURN], 4.875, 1);

        let ring = ctx.scene.find_by_tag("Saturn-ring").unwrap().id;
        assert_eq!(ctx.graph.get_parent(ring), Some(saturn));
        let local = ctx.graph.get_local(ring).unwrap();
        assert_eq!(local.scale, Vec3::new(1.0, 1.0, 0.1));

        // The torus axis (local Z) ends up along world Y.
        let axis = local.rotation * Vec3::Z;
        assert!(axis.y.abs() > 0.999);
    }

    #[test]
    fn texture_comes_from_registry() {
        let manifest = orrery_engine::AssetManifest::from_json(
            r#"{ "textures": [{ "name": "earth", "path": "textures/earth.png" }] }"#,
        )
        .unwrap();
        let mut ctx = EngineContext::new();
        ctx.textures = orrery_engine::TextureRegistry::from_manifest(&manifest);
        let parent = root(&mut ctx);
        let id = spawn_planet(&mut ctx, parent, &PLANETS[EARTH], 3.0, 1);

        match ctx.scene.get(id).unwrap().mesh.as_ref().unwrap().material {
            Material::Standard { texture, .. } => assert_eq!(texture, ctx.textures.get("earth")),
            ref other => panic!("unexpected material {:?}", other),
        }
    }
}
