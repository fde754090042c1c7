use glam::Vec3;
use crate::geometry::GeometryId;

/// Per-frame behaviour an entity may expose. Applied by
/// `systems::motion::MotionSystem` with the current animation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Local rotation becomes `t * rate` radians about `axis`.
    Spin { axis: Vec3, rate: f32 },
    /// Re-displace the vertices of a dynamic geometry with animated noise.
    Displace(SurfaceNoise),
}

impl Motion {
    pub fn spin_y(rate: f32) -> Self {
        Motion::Spin { axis: Vec3::Y, rate }
    }

    pub fn spin_z(rate: f32) -> Self {
        Motion::Spin { axis: Vec3::Z, rate }
    }
}

/// Radial noise displacement of a sphere-like geometry.
///
/// For each vertex with unit direction `n`, the noise is sampled at
/// `n * frequency + (cos t, sin t, t)` and the vertex moves to
/// `n * (radius + noise * amplitude)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceNoise {
    pub geometry: GeometryId,
    pub radius: f32,
    pub frequency: f32,
    pub amplitude: f32,
}

impl SurfaceNoise {
    pub fn new(geometry: GeometryId, radius: f32) -> Self {
        Self {
            geometry,
            radius,
            frequency: 3.0,
            amplitude: 0.4,
        }
    }

    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }
}
