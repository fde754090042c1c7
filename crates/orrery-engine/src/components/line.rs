use glam::Vec3;
use crate::components::color::Color;

/// Fat polyline in the entity's local space.
///
/// `colors` holds either one color for the whole line or one per point.
#[derive(Debug, Clone, PartialEq)]
pub struct LineComponent {
    pub points: Vec<Vec3>,
    pub colors: Vec<Color>,
    /// Screen-space width in pixels.
    pub width: f32,
}

impl LineComponent {
    pub fn solid(points: Vec<Vec3>, color: Color, width: f32) -> Self {
        Self {
            points,
            colors: vec![color],
            width,
        }
    }

    pub fn gradient(points: Vec<Vec3>, colors: Vec<Color>, width: f32) -> Self {
        Self { points, colors, width }
    }

    /// Color of the point at `index`.
    pub fn color_at(&self, index: usize) -> Color {
        match self.colors.len() {
            0 => Color::WHITE,
            1 => self.colors[0],
            n => self.colors[index.min(n - 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_line_repeats_color() {
        let line = LineComponent::solid(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Color::BLACK, 1.0);
        assert_eq!(line.color_at(2), Color::BLACK);
    }

    #[test]
    fn gradient_line_indexes_colors() {
        let colors = vec![Color::WHITE, Color::BLACK];
        let line = LineComponent::gradient(vec![Vec3::ZERO, Vec3::X], colors, 2.0);
        assert_eq!(line.color_at(0), Color::WHITE);
        assert_eq!(line.color_at(1), Color::BLACK);
        assert_eq!(line.color_at(9), Color::BLACK);
    }
}
