use glam::Mat4;
use crate::assets::registry::TextureId;
use crate::components::color::Color;
use crate::geometry::GeometryId;
use crate::renderer::fresnel::FresnelParams;

/// Which faces of a mesh are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

impl Side {
    pub fn code(self) -> f32 {
        match self {
            Side::Front => 0.0,
            Side::Back => 1.0,
            Side::Double => 2.0,
        }
    }
}

/// Surface description handed to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lit material with optional color map and self-illumination.
    Standard {
        color: Color,
        emissive: Color,
        texture: Option<TextureId>,
    },
    /// Unlit flat color.
    Basic { color: Color, side: Side },
    /// View-dependent rim glow, additively blended.
    Fresnel(FresnelParams),
}

impl Material {
    /// White standard material, the renderer's default surface.
    pub fn standard() -> Self {
        Material::Standard {
            color: Color::WHITE,
            emissive: Color::BLACK,
            texture: None,
        }
    }

    pub fn textured(texture: Option<TextureId>) -> Self {
        Material::Standard {
            color: Color::WHITE,
            emissive: Color::BLACK,
            texture,
        }
    }

    pub fn emissive(emissive: Color) -> Self {
        Material::Standard {
            color: Color::WHITE,
            emissive,
            texture: None,
        }
    }

    /// Numeric tag written into the render buffer.
    pub fn kind_code(&self) -> f32 {
        match self {
            Material::Standard { .. } => 0.0,
            Material::Basic { .. } => 1.0,
            Material::Fresnel(_) => 2.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard()
    }
}

/// Triangle mesh component. A non-empty `instances` list turns the entity
/// into an instanced mesh: one draw per instance matrix, each relative to
/// the entity's world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub geometry: GeometryId,
    pub material: Material,
    pub instances: Vec<Mat4>,
}

impl MeshComponent {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self {
            geometry,
            material,
            instances: Vec::new(),
        }
    }

    pub fn with_instances(mut self, instances: Vec<Mat4>) -> Self {
        self.instances = instances;
        self
    }

    pub fn is_instanced(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Number of draws this component contributes.
    pub fn draw_count(&self) -> usize {
        self.instances.len().max(1)
    }
}
