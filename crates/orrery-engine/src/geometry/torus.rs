use std::f32::consts::TAU;
use glam::Vec3;
use super::Geometry;

/// Indexed torus in the XY plane, centered on the origin.
///
/// `radius` is the distance from the center to the middle of the tube,
/// `tube` the tube radius.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial = radial_segments.max(2) as usize;
    let tubular = tubular_segments.max(3) as usize;

    let vertex_count = (radial + 1) * (tubular + 1);
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;

            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);

            positions.push(position);
            normals.push((position - center).normalize_or_zero());
        }
    }

    let stride = (tubular + 1) as u32;
    let mut indices = Vec::with_capacity(radial * tubular * 6);
    for j in 1..=radial as u32 {
        for i in 1..=tubular as u32 {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_counts() {
        let g = torus(0.6, 0.15, 8, 64);
        assert_eq!(g.vertex_count(), 9 * 65);
        assert_eq!(g.triangle_count(), 8 * 64 * 2);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }

    #[test]
    fn vertices_stay_within_tube() {
        let g = torus(0.5, 0.05, 8, 64);
        for p in &g.positions {
            let ring = (p.x * p.x + p.y * p.y).sqrt();
            let from_tube_center = ((ring - 0.5).powi(2) + p.z * p.z).sqrt();
            assert!((from_tube_center - 0.05).abs() < 1e-4);
        }
        assert!((g.bounding_radius() - 0.55).abs() < 1e-4);
    }
}
