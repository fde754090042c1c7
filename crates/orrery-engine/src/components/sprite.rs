use crate::assets::registry::TextureId;
use crate::components::color::Color;

/// Camera-facing textured quad (nebula puffs and similar billboards).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    pub color: Color,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
    pub texture: Option<TextureId>,
    /// Edge length in world units before the entity's scale is applied.
    pub size: f32,
    /// Screen-space rotation in radians.
    pub rotation: f32,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            texture: None,
            size: 1.0,
            rotation: 0.0,
        }
    }
}
