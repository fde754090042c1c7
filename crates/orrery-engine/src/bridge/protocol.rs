/// Render buffer layout shared with the host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Meshes: max_mesh_instances × 32 floats]
/// [Lines: max_line_vertices × 8 floats]
/// [Points: max_point_vertices × 8 floats]
/// [Sprites: max_sprites × 12 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{
    LightRecord, LineVertex, MeshInstance, PointVertex, RenderFrame, SpriteInstance,
};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
/// 1.0 once the first frame has been published; zero before init.
pub const HEADER_READY: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_MESH_INSTANCES: usize = 3;
pub const HEADER_MESH_INSTANCE_COUNT: usize = 4;
pub const HEADER_MAX_LINE_VERTICES: usize = 5;
pub const HEADER_LINE_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_POINT_VERTICES: usize = 7;
pub const HEADER_POINT_VERTEX_COUNT: usize = 8;
pub const HEADER_MAX_SPRITES: usize = 9;
pub const HEADER_SPRITE_COUNT: usize = 10;
pub const HEADER_MAX_LIGHTS: usize = 11;
pub const HEADER_LIGHT_COUNT: usize = 12;
pub const HEADER_MAX_EVENTS: usize = 13;
pub const HEADER_EVENT_COUNT: usize = 14;
/// Sum of geometry versions; changes whenever any vertex buffer must be re-uploaded.
pub const HEADER_GEOMETRY_REVISION: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_mesh_instances: usize,
    pub max_line_vertices: usize,
    pub max_point_vertices: usize,
    pub max_sprites: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    pub mesh_data_offset: usize,
    pub line_data_offset: usize,
    pub point_data_offset: usize,
    pub sprite_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Per-frame values written into the header alongside the capacities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frame_counter: u32,
    pub event_count: usize,
    pub geometry_revision: u32,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_mesh_instances: usize,
        max_line_vertices: usize,
        max_point_vertices: usize,
        max_sprites: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        let camera_offset = HEADER_FLOATS;
        let mesh_data_offset = camera_offset + CameraUniform::FLOATS;
        let line_data_offset = mesh_data_offset + max_mesh_instances * MeshInstance::FLOATS;
        let point_data_offset = line_data_offset + max_line_vertices * LineVertex::FLOATS;
        let sprite_data_offset = point_data_offset + max_point_vertices * PointVertex::FLOATS;
        let light_data_offset = sprite_data_offset + max_sprites * SpriteInstance::FLOATS;
        let event_data_offset = light_data_offset + max_lights * LightRecord::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_mesh_instances,
            max_line_vertices,
            max_point_vertices,
            max_sprites,
            max_lights,
            max_events,
            camera_offset,
            mesh_data_offset,
            line_data_offset,
            point_data_offset,
            sprite_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_mesh_instances,
            config.max_line_vertices,
            config.max_point_vertices,
            config.max_sprites,
            config.max_lights,
            config.max_events,
        )
    }

    /// Fill a header block and flag it ready.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], frame: &RenderFrame, stats: FrameStats) {
        header[HEADER_READY] = 1.0;
        header[HEADER_FRAME_COUNTER] = stats.frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_MESH_INSTANCES] = self.max_mesh_instances as f32;
        header[HEADER_MESH_INSTANCE_COUNT] = frame.mesh_count() as f32;
        header[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        header[HEADER_LINE_VERTEX_COUNT] = frame.line_vertex_count() as f32;
        header[HEADER_MAX_POINT_VERTICES] = self.max_point_vertices as f32;
        header[HEADER_POINT_VERTEX_COUNT] = frame.point_count() as f32;
        header[HEADER_MAX_SPRITES] = self.max_sprites as f32;
        header[HEADER_SPRITE_COUNT] = frame.sprite_count() as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = frame.light_count() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = stats.event_count.min(self.max_events) as f32;
        header[HEADER_GEOMETRY_REVISION] = stats.geometry_revision as f32;
    }
}
