use crate::components::light::LightComponent;
use crate::core::scene::Scene;
use crate::renderer::instance::{LightRecord, RenderFrame};

/// Serialize the lights of all active entities.
///
/// Point lights sit at the entity's world position. Directional lights shine
/// from the entity's world position toward the origin.
pub fn collect_lights(scene: &Scene, frame: &mut RenderFrame) {
    for entity in scene.iter().filter(|e| e.active) {
        let Some(light) = &entity.light else { continue };
        if !frame.push_light(light_record(light, entity.world_position())) {
            return;
        }
    }
}

pub fn light_record(light: &LightComponent, position: glam::Vec3) -> LightRecord {
    let color = light.color();
    LightRecord {
        x: position.x,
        y: position.y,
        z: position.z,
        kind: light.kind_code(),
        r: color.r,
        g: color.g,
        b: color.b,
        intensity: light.intensity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::entity::Entity;
    use glam::{Mat4, Vec3};

    #[test]
    fn lights_follow_world_position() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_world(Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)))
                .with_light(LightComponent::directional(0x0099ff, 1.0)),
        );
        scene.spawn(Entity::new(EntityId(2)).with_light(LightComponent::point(0xffff99, 10.0)));

        let mut frame = RenderFrame::default();
        collect_lights(&scene, &mut frame);

        assert_eq!(frame.light_count(), 2);
        let dir = frame.lights[0];
        assert_eq!((dir.y, dir.kind), (1.0, 1.0));
        assert!((dir.b - 1.0).abs() < 1e-6);
        assert_eq!(frame.lights[1].intensity, 10.0);
    }
}
