use glam::{Mat4, Vec3};
use crate::assets::registry::TextureId;
use crate::components::entity::Entity;
use crate::components::mesh::{Material, MeshComponent};
use crate::core::scene::Scene;
use crate::renderer::instance::{
    LineVertex, MeshInstance, PointVertex, RenderFrame, SpriteInstance, NO_TEXTURE,
};
use crate::systems::lighting::collect_lights;

/// Rebuild every render buffer from the active entities of the scene.
/// Records beyond a section's capacity are dropped with a single warning.
pub fn build_render_frame(scene: &Scene, frame: &mut RenderFrame) {
    frame.clear();

    for entity in scene.iter() {
        if !entity.active {
            continue;
        }
        if let Some(mesh) = &entity.mesh {
            push_mesh(frame, entity.world, mesh);
        }
        push_line(frame, entity);
        push_points(frame, entity);
        push_sprite(frame, entity);
    }

    collect_lights(scene, frame);

    if frame.overflowed() {
        let cap = frame.capacity();
        log::warn!(
            "render frame overflow: meshes {}/{}, line vertices {}/{}, points {}/{}, sprites {}/{}, lights {}/{}",
            frame.mesh_count(), cap.meshes,
            frame.line_vertex_count(), cap.lines,
            frame.point_count(), cap.points,
            frame.sprite_count(), cap.sprites,
            frame.light_count(), cap.lights,
        );
    }
}

fn texture_slot(texture: Option<TextureId>) -> f32 {
    texture.map_or(NO_TEXTURE, |t| t.0 as f32)
}

/// Encode a mesh component at one world transform.
pub fn mesh_instance(model: Mat4, mesh: &MeshComponent) -> MeshInstance {
    let mut inst = MeshInstance {
        model: model.to_cols_array(),
        color: [1.0; 4],
        emissive: [0.0; 3],
        material: mesh.material.kind_code(),
        geometry: mesh.geometry.0 as f32,
        texture: NO_TEXTURE,
        side: 0.0,
        blend: 0.0,
        params: [0.0; 4],
    };
    match mesh.material {
        Material::Standard { color, emissive, texture } => {
            inst.color = color.to_rgba(1.0);
            inst.emissive = emissive.to_array();
            inst.texture = texture_slot(texture);
        }
        Material::Basic { color, side } => {
            inst.color = color.to_rgba(1.0);
            inst.side = side.code();
        }
        Material::Fresnel(params) => {
            inst.color = params.rim.to_rgba(1.0);
            inst.emissive = params.facing.to_array();
            inst.blend = 1.0;
            inst.params = [params.bias, params.scale, params.power, 0.0];
        }
    }
    inst
}

fn push_mesh(frame: &mut RenderFrame, world: Mat4, mesh: &MeshComponent) {
    if mesh.is_instanced() {
        for &local in &mesh.instances {
            if !frame.push_mesh(mesh_instance(world * local, mesh)) {
                return;
            }
        }
    } else {
        frame.push_mesh(mesh_instance(world, mesh));
    }
}

fn push_line(frame: &mut RenderFrame, entity: &Entity) {
    let Some(line) = &entity.line else { return };
    if line.points.len() < 2 {
        return;
    }
    let world = entity.world;
    let width = line.width;
    frame.push_line_strip(line.points.iter().enumerate().map(|(i, &p)| {
        let p = world.transform_point3(p);
        let c = line.color_at(i);
        LineVertex {
            x: p.x,
            y: p.y,
            z: p.z,
            r: c.r,
            g: c.g,
            b: c.b,
            width,
            strip: 0.0,
        }
    }));
}

fn push_points(frame: &mut RenderFrame, entity: &Entity) {
    let Some(points) = &entity.points else { return };
    let texture = texture_slot(points.texture);
    for (i, &p) in points.positions.iter().enumerate() {
        let p = entity.world.transform_point3(p);
        let c = points.colors.get(i).copied().unwrap_or_default();
        let pushed = frame.push_point(PointVertex {
            x: p.x,
            y: p.y,
            z: p.z,
            r: c.r,
            g: c.g,
            b: c.b,
            size: points.size,
            texture,
        });
        if !pushed {
            return;
        }
    }
}

fn push_sprite(frame: &mut RenderFrame, entity: &Entity) {
    let Some(sprite) = &entity.sprite else { return };
    let p = entity.world_position();
    let scale = entity.world.transform_vector3(Vec3::X).length();
    frame.push_sprite(SpriteInstance {
        x: p.x,
        y: p.y,
        z: p.z,
        size: sprite.size * scale,
        r: sprite.color.r,
        g: sprite.color.g,
        b: sprite.color.b,
        opacity: sprite.opacity,
        rotation: sprite.rotation,
        texture: texture_slot(sprite.texture),
        _pad: [0.0; 2],
    });
}
