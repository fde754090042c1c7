use glam::{Quat, Vec3};
use noise::{NoiseFn, Perlin};
use crate::api::types::EntityId;
use crate::components::motion::{Motion, SurfaceNoise};
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::geometry::{Geometry, GeometryStore};

/// Applies every entity's `Motion` for the current animation time.
///
/// Nodes are visited depth-first from the graph roots, parents before
/// children. Inactive entities prune their whole subtree.
pub struct MotionSystem {
    perlin: Perlin,
    order: Vec<EntityId>,
}

impl MotionSystem {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            order: Vec::new(),
        }
    }

    /// Run one update pass. Returns the number of motions applied.
    pub fn update(
        &mut self,
        scene: &Scene,
        graph: &mut TransformGraph,
        geometries: &mut GeometryStore,
        t: f32,
    ) -> usize {
        self.order.clear();
        for &root in graph.roots() {
            collect_active(graph, scene, root, &mut self.order);
        }

        let mut applied = 0;
        for &id in &self.order {
            let Some(motion) = scene.get(id).and_then(|e| e.motion) else {
                continue;
            };
            match motion {
                Motion::Spin { axis, rate } => {
                    if let Some(local) = graph.get_local_mut(id) {
                        local.rotation = Quat::from_axis_angle(axis.normalize_or(Vec3::Y), t * rate);
                    }
                }
                Motion::Displace(surface) => match geometries.get_mut(surface.geometry) {
                    Some(geometry) => displace(&self.perlin, &surface, geometry, t),
                    None => {
                        log::warn!("entity {:?} displaces missing geometry {:?}", id, surface.geometry);
                        continue;
                    }
                },
            }
            applied += 1;
        }
        applied
    }
}

impl Default for MotionSystem {
    fn default() -> Self {
        Self::new(0)
    }
}

fn collect_active(graph: &TransformGraph, scene: &Scene, id: EntityId, out: &mut Vec<EntityId>) {
    if scene.get(id).is_some_and(|e| !e.active) {
        return;
    }
    out.push(id);
    if let Some(children) = graph.get_children(id) {
        for &child in children {
            collect_active(graph, scene, child, out);
        }
    }
}

/// Move each vertex along its radial direction by animated Perlin noise.
fn displace(perlin: &Perlin, surface: &SurfaceNoise, geometry: &mut Geometry, t: f32) {
    let (cos_t, sin_t) = (t.cos() as f64, t.sin() as f64);
    let t = t as f64;

    for (position, normal) in geometry.positions.iter_mut().zip(geometry.normals.iter_mut()) {
        let dir = position.normalize_or(*normal);
        let v = dir * surface.frequency;
        let ns = perlin.get([v.x as f64 + cos_t, v.y as f64 + sin_t, v.z as f64 + t]) as f32;
        *position = dir * surface.radius + dir * (ns * surface.amplitude);
        *normal = dir;
    }
}
