/// The sun: an emissive sphere with a Fresnel rim, a noise-displaced corona
/// and the point light that illuminates the planets.

use glam::Vec3;
use orrery_engine::icosphere;
use orrery_engine::{
    Color, EngineContext, Entity, EntityId, FresnelParams, LightComponent, LocalTransform, Material,
    MeshComponent, Motion, Side, SurfaceNoise,
};

use crate::bodies::{
    CORONA_NOISE_AMPLITUDE, CORONA_NOISE_FREQUENCY, CORONA_RADIUS, SUN_EMISSIVE, SUN_GLOW,
    SUN_LIGHT_INTENSITY, SUN_RADIUS, SUN_RIM_SCALE,
};

/// Entities making up the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunParts {
    pub body: EntityId,
    pub rim: EntityId,
    pub corona: EntityId,
    pub light: EntityId,
}

pub fn spawn_sun(ctx: &mut EngineContext, parent: EntityId, detail: u32) -> SunParts {
    let geometry = ctx.geometries.insert(icosphere(SUN_RADIUS, detail));

    let body = ctx.next_id();
    ctx.spawn_child(
        Entity::new(body)
            .with_tag("sun")
            .with_mesh(MeshComponent::new(
                geometry,
                Material::emissive(Color::from_hex(SUN_EMISSIVE)),
            ))
            .with_motion(Motion::spin_y(1.0)),
        parent,
        LocalTransform::new(),
    );

    // The rim shares the body's geometry, scaled just past it.
    let rim = ctx.next_id();
    ctx.spawn_child(
        Entity::new(rim)
            .with_tag("sun-rim")
            .with_mesh(MeshComponent::new(
                geometry,
                Material::Fresnel(FresnelParams::new(SUN_GLOW, 0x000000)),
            )),
        body,
        LocalTransform::new().with_scale(Vec3::splat(SUN_RIM_SCALE)),
    );

    // Displacement rewrites vertices in place, so the corona owns its geometry.
    let corona_geometry = ctx.geometries.insert(icosphere(CORONA_RADIUS, detail));
    let surface = SurfaceNoise::new(corona_geometry, CORONA_RADIUS)
        .with_frequency(CORONA_NOISE_FREQUENCY)
        .with_amplitude(CORONA_NOISE_AMPLITUDE);
    let corona = ctx.next_id();
    ctx.spawn_child(
        Entity::new(corona)
            .with_tag("corona")
            .with_mesh(MeshComponent::new(
                corona_geometry,
                Material::Basic {
                    color: Color::from_hex(SUN_GLOW),
                    side: Side::Back,
                },
            ))
            .with_motion(Motion::Displace(surface)),
        body,
        LocalTransform::new(),
    );

    let light = ctx.next_id();
    ctx.spawn_child(
        Entity::new(light)
            .with_tag("sun-light")
            .with_light(LightComponent::point(SUN_GLOW, SUN_LIGHT_INTENSITY)),
        body,
        LocalTransform::new(),
    );

    log::debug!("sun spawned with detail {}", detail);
    SunParts {
        body,
        rim,
        corona,
        light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(ctx: &mut EngineContext) -> SunParts {
        let root = ctx.next_id();
        ctx.spawn(Entity::new(root), LocalTransform::new());
        spawn_sun(ctx, root, 2)
    }

    #[test]
    fn parts_hang_off_the_body() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        let children = ctx.graph.get_children(sun.body).unwrap();
        assert_eq!(children, &[sun.rim, sun.corona, sun.light]);
    }

    #[test]
    fn rim_reuses_body_geometry() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        let body = ctx.scene.get(sun.body).unwrap().mesh.as_ref().unwrap().geometry;
        let rim = ctx.scene.get(sun.rim).unwrap().mesh.as_ref().unwrap().geometry;
        let corona = ctx.scene.get(sun.corona).unwrap().mesh.as_ref().unwrap().geometry;
        assert_eq!(body, rim);
        assert_ne!(body, corona);
        assert_eq!(ctx.graph.get_local(sun.rim).unwrap().scale, Vec3::splat(1.01));
    }

    #[test]
    fn body_spins_with_time() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        ctx.update_motions(0.5);
        let rotation = ctx.graph.get_local(sun.body).unwrap().rotation;
        let (axis, angle) = rotation.to_axis_angle();
        assert!((angle - 0.5).abs() < 1e-5);
        assert!((axis - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn corona_reshapes_every_update() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        let geometry = ctx.scene.get(sun.corona).unwrap().mesh.as_ref().unwrap().geometry;
        let before = ctx.geometries.get(geometry).unwrap().version();

        ctx.update_motions(0.1);
        ctx.update_motions(0.2);
        let corona = ctx.geometries.get(geometry).unwrap();
        assert_eq!(corona.version(), before + 2);
        for p in &corona.positions {
            let r = p.length();
            assert!(r > 0.4 && r < 1.4, "corona vertex at radius {}", r);
        }
    }

    #[test]
    fn corona_noise_settings() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        match ctx.scene.get(sun.corona).unwrap().motion {
            Some(Motion::Displace(surface)) => {
                assert_eq!(surface.radius, 0.9);
                assert_eq!(surface.frequency, 3.0);
                assert_eq!(surface.amplitude, 0.4);
            }
            other => panic!("corona motion {:?}", other),
        }
    }

    #[test]
    fn point_light_is_warm_white() {
        let mut ctx = EngineContext::new();
        let sun = spawn(&mut ctx);
        let light = ctx.scene.get(sun.light).unwrap().light.unwrap();
        assert_eq!(light.intensity(), 10.0);
        assert_eq!(light.color(), Color::from_hex(0xffff99));
    }
}
