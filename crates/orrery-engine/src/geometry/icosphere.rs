use glam::Vec3;
use super::Geometry;

const PHI: f32 = 1.618_034;

const BASE_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0], [1.0, PHI, 0.0], [-1.0, -PHI, 0.0], [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI], [0.0, 1.0, PHI], [0.0, -1.0, -PHI], [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0], [PHI, 0.0, 1.0], [-PHI, 0.0, -1.0], [-PHI, 0.0, 1.0],
];

const BASE_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Subdivided icosahedron projected onto a sphere of `radius`.
///
/// Each of the 20 faces is split into `(detail + 1)^2` triangles. The result
/// is a non-indexed triangle list so every vertex can be displaced on its
/// own; normals point away from the center.
pub fn icosphere(radius: f32, detail: u32) -> Geometry {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(20 * cols * cols * 3);

    for face in BASE_FACES {
        let a = Vec3::from(BASE_VERTICES[face[0]]);
        let b = Vec3::from(BASE_VERTICES[face[1]]);
        let c = Vec3::from(BASE_VERTICES[face[2]]);
        subdivide_face(a, b, c, cols, &mut positions);
    }

    let normals: Vec<Vec3> = positions.iter().map(|p| p.normalize()).collect();
    let positions = normals.iter().map(|n| *n * radius).collect();
    Geometry::new(positions, normals, Vec::new())
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    // grid[i][j]: row i walks from edge ab toward c
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let aj = a.lerp(c, i as f32 / cols as f32);
        let bj = b.lerp(c, i as f32 / cols as f32);
        let rows = cols - i;
        let row = if rows == 0 {
            vec![aj]
        } else {
            (0..=rows).map(|j| aj.lerp(bj, j as f32 / rows as f32)).collect()
        };
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend_from_slice(&[grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_has_twenty_faces() {
        let g = icosphere(1.0, 0);
        assert_eq!(g.triangle_count(), 20);
        assert_eq!(g.vertex_count(), 60);
    }

    #[test]
    fn detail_multiplies_faces() {
        let g = icosphere(1.0, 6);
        assert_eq!(g.triangle_count(), 20 * 49);
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let g = icosphere(0.9, 3);
        for p in &g.positions {
            assert!((p.length() - 0.9).abs() < 1e-4, "vertex off sphere: {:?}", p);
        }
        for (p, n) in g.positions.iter().zip(&g.normals) {
            assert!((p.normalize() - *n).length() < 1e-4);
        }
    }

    #[test]
    fn faces_wind_outward() {
        let g = icosphere(1.0, 1);
        for tri in g.positions.chunks(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let center = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(normal.dot(center) > 0.0);
        }
    }
}
