use crate::api::error::ConfigError;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::error::AssetError;
use crate::assets::library::MeshLibrary;
use crate::assets::registry::TextureRegistry;
use crate::components::color::Color;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::geometry::{GeometryId, GeometryStore};
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{FrameCapacity, RenderFrame};
use crate::systems::motion::MotionSystem;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum mesh draws per frame, instances included (default: 512).
    pub max_mesh_instances: usize,
    /// Maximum line vertices per frame (default: 8192).
    pub max_line_vertices: usize,
    /// Maximum point vertices per frame (default: 4096).
    pub max_point_vertices: usize,
    /// Maximum sprites per frame (default: 64).
    pub max_sprites: usize,
    /// Maximum lights per frame (default: 8).
    pub max_lights: usize,
    /// Maximum game events per frame (default: 32).
    pub max_events: usize,
    /// Meshes the host must supply through `load_mesh` before `init` runs.
    pub required_meshes: Vec<String>,
    pub clear_color: Color,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial viewport size in CSS pixels, until the host reports a resize.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Seed for the noise behind `Motion::Displace`.
    pub noise_seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_mesh_instances: 512,
            max_line_vertices: 8192,
            max_point_vertices: 4096,
            max_sprites: 64,
            max_lights: 8,
            max_events: 32,
            required_meshes: Vec::new(),
            clear_color: Color::BLACK,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            noise_seed: 0,
        }
    }
}

impl GameConfig {
    pub fn frame_capacity(&self) -> FrameCapacity {
        FrameCapacity {
            meshes: self.max_mesh_instances,
            lines: self.max_line_vertices,
            points: self.max_point_vertices,
            sprites: self.max_sprites,
            lights: self.max_lights,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called on construction, before init and
    /// once after init, so capacities may depend on what init loaded.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply a JSON configuration document before init.
    fn configure(&mut self, _json: &str) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Build the scene. Runs once, after every required mesh is loaded.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step: handle input, advance the simulation.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass appending custom records after the scene is built.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Optional JSON description of the host-side controls.
    fn ui_json(&self) -> Option<String> {
        None
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub geometries: GeometryStore,
    pub meshes: MeshLibrary,
    pub textures: TextureRegistry,
    pub camera: PerspectiveCamera,
    pub motions: MotionSystem,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            geometries: GeometryStore::new(),
            meshes: MeshLibrary::new(),
            textures: TextureRegistry::new(),
            camera: PerspectiveCamera::new(
                config.fov_y_deg,
                config.viewport_width,
                config.viewport_height,
                config.near,
                config.far,
            ),
            motions: MotionSystem::new(config.noise_seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a top-level entity.
    pub fn spawn(&mut self, entity: Entity, local: LocalTransform) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        self.graph.register_with(id, local);
        id
    }

    /// Add an entity under `parent`.
    pub fn spawn_child(&mut self, entity: Entity, parent: EntityId, local: LocalTransform) -> EntityId {
        let id = self.spawn(entity, local);
        self.graph.set_parent(id, Some(parent));
        id
    }

    /// Remove an entity and everything below it from scene and graph.
    /// Returns how many entities were removed.
    pub fn despawn(&mut self, id: EntityId) -> usize {
        let subtree = self.graph.descendants(id);
        let mut removed = 0;
        for &node in subtree.iter().rev() {
            if self.scene.despawn(node).is_some() {
                removed += 1;
            }
            self.graph.remove(node);
        }
        if subtree.is_empty() && self.scene.despawn(id).is_some() {
            removed += 1;
        }
        removed
    }

    /// Parse OBJ text and register its objects under `name`.
    pub fn load_obj(&mut self, name: &str, text: &str) -> Result<Vec<GeometryId>, AssetError> {
        self.meshes
            .load_obj(name, text, &mut self.geometries)
            .map(<[GeometryId]>::to_vec)
    }

    /// Apply every entity's motion for animation time `t`.
    pub fn update_motions(&mut self, t: f32) -> usize {
        self.motions.update(&self.scene, &mut self.graph, &mut self.geometries, t)
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub frame: &'a mut RenderFrame,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn ids_start_at_one() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.next_id(), EntityId(1));
        assert_eq!(ctx.next_id(), EntityId(2));
    }

    #[test]
    fn spawn_child_follows_parent() {
        let mut ctx = EngineContext::new();
        let earth = ctx.next_id();
        ctx.spawn(Entity::new(earth), LocalTransform::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let moon = ctx.next_id();
        ctx.spawn_child(Entity::new(moon), earth, LocalTransform::from_translation(Vec3::new(0.4, 0.0, 0.0)));

        ctx.graph.propagate(&mut ctx.scene);
        let pos = ctx.scene.get(moon).unwrap().world_position();
        assert!((pos - Vec3::new(3.4, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn despawn_removes_subtree() {
        let mut ctx = EngineContext::new();
        let root = ctx.next_id();
        ctx.spawn(Entity::new(root), LocalTransform::new());
        let child = ctx.next_id();
        ctx.spawn_child(Entity::new(child), root, LocalTransform::new());
        let grandchild = ctx.next_id();
        ctx.spawn_child(Entity::new(grandchild), child, LocalTransform::new());
        let other = ctx.next_id();
        ctx.spawn(Entity::new(other), LocalTransform::new());

        assert_eq!(ctx.despawn(child), 2);
        assert_eq!(ctx.scene.len(), 2);
        assert!(!ctx.graph.contains(grandchild));
        assert!(ctx.graph.get_children(root).unwrap().is_empty());
    }

    #[test]
    fn load_obj_registers_geometry() {
        let mut ctx = EngineContext::new();
        let ids = ctx.load_obj("Rock1", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ctx.meshes.contains("Rock1"));
        assert_eq!(ctx.geometries.get(ids[0]).unwrap().triangle_count(), 1);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn camera_uses_config() {
        let config = GameConfig {
            viewport_width: 1000.0,
            viewport_height: 500.0,
            ..GameConfig::default()
        };
        let ctx = EngineContext::from_config(&config);
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(ctx.camera.fov_y_deg, 75.0);
    }
}
