use glam::Vec3;
use crate::assets::registry::TextureId;
use crate::components::color::Color;

/// Point cloud with per-point colors (the starfield).
#[derive(Debug, Clone, PartialEq)]
pub struct PointsComponent {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
    /// Point size in world units (attenuated by the host).
    pub size: f32,
    pub texture: Option<TextureId>,
}

impl PointsComponent {
    pub fn new(positions: Vec<Vec3>, colors: Vec<Color>, size: f32) -> Self {
        Self {
            positions,
            colors,
            size,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
