use glam::{Mat4, Vec3};
use crate::api::types::EntityId;
use crate::components::light::LightComponent;
use crate::components::line::LineComponent;
use crate::components::mesh::MeshComponent;
use crate::components::motion::Motion;
use crate::components::points::PointsComponent;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct with optional components.
/// An entity with no components is a plain group node.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities (and their subtrees) are neither animated nor drawn.
    pub active: bool,
    /// World transform, written by `TransformGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
    pub sprite: Option<SpriteComponent>,
    pub line: Option<LineComponent>,
    pub points: Option<PointsComponent>,
    pub light: Option<LightComponent>,
    pub motion: Option<Motion>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            world: Mat4::IDENTITY,
            mesh: None,
            sprite: None,
            line: None,
            points: None,
            light: None,
            motion: None,
        }
    }

    /// Translation part of the world transform.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_line(mut self, line: LineComponent) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_points(mut self, points: PointsComponent) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_light(mut self, light: LightComponent) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }
}
