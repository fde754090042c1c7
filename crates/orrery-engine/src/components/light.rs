use crate::components::color::Color;

/// Light source attached to an entity. Its position (or, for directional
/// lights, the direction toward the origin) comes from the entity's world
/// transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightComponent {
    Point { color: Color, intensity: f32 },
    Directional { color: Color, intensity: f32 },
}

impl LightComponent {
    pub fn point(hex: u32, intensity: f32) -> Self {
        LightComponent::Point {
            color: Color::from_hex(hex),
            intensity,
        }
    }

    pub fn directional(hex: u32, intensity: f32) -> Self {
        LightComponent::Directional {
            color: Color::from_hex(hex),
            intensity,
        }
    }

    pub fn kind_code(&self) -> f32 {
        match self {
            LightComponent::Point { .. } => 0.0,
            LightComponent::Directional { .. } => 1.0,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            LightComponent::Point { color, .. } | LightComponent::Directional { color, .. } => color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            LightComponent::Point { intensity, .. }
            | LightComponent::Directional { intensity, .. } => intensity,
        }
    }
}
