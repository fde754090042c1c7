//! Wavefront OBJ reader for the subset rock meshes use.
//!
//! Supports `o`/`g` object boundaries, `v`, `vn` and `f` records with any of
//! the `v`, `v/vt`, `v//vn`, `v/vt/vn` forms, including negative (relative)
//! indices. Polygons are fan-triangulated. Texture coordinates, materials and
//! smoothing groups are ignored.

use glam::Vec3;
use crate::assets::error::AssetError;
use crate::geometry::Geometry;

/// One object of an OBJ document as a non-indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl ObjMesh {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            positions: Vec::new(),
            normals: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn into_geometry(self) -> Geometry {
        Geometry::new(self.positions, self.normals, Vec::new())
    }
}

#[derive(Clone, Copy)]
struct FaceVertex {
    position: usize,
    normal: Option<usize>,
}

/// Parse an OBJ document into one mesh per object that has faces.
pub fn parse_obj(text: &str) -> Result<Vec<ObjMesh>, AssetError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut meshes = Vec::new();
    let mut current = ObjMesh::named("");

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else { continue };

        match keyword {
            "v" => positions.push(parse_vec3(fields, line_no)?),
            "vn" => normals.push(parse_vec3(fields, line_no)?),
            "o" | "g" => {
                let name = fields.collect::<Vec<_>>().join(" ");
                if current.positions.is_empty() {
                    current.name = name;
                } else {
                    meshes.push(std::mem::replace(&mut current, ObjMesh::named(&name)));
                }
            }
            "f" => {
                let corners = fields
                    .map(|f| parse_face_vertex(f, positions.len(), normals.len(), line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(AssetError::Parse {
                        line: line_no,
                        message: format!("face needs at least 3 vertices, got {}", corners.len()),
                    });
                }
                for k in 1..corners.len() - 1 {
                    push_triangle(&mut current, [corners[0], corners[k], corners[k + 1]], &positions, &normals);
                }
            }
            _ => {}
        }
    }

    if !current.positions.is_empty() {
        meshes.push(current);
    }
    if meshes.is_empty() {
        return Err(AssetError::Empty);
    }
    log::debug!(
        "parsed obj: {} meshes, {} triangles",
        meshes.len(),
        meshes.iter().map(ObjMesh::triangle_count).sum::<usize>()
    );
    Ok(meshes)
}

fn parse_vec3<'a>(mut fields: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec3, AssetError> {
    let mut v = [0.0f32; 3];
    for slot in &mut v {
        let field = fields.next().ok_or_else(|| AssetError::Parse {
            line,
            message: "expected 3 coordinates".to_string(),
        })?;
        *slot = field.parse().map_err(|_| AssetError::Parse {
            line,
            message: format!("invalid number '{}'", field),
        })?;
    }
    Ok(Vec3::from_array(v))
}

/// Resolve a 1-based (or negative, relative) OBJ index into a 0-based one.
fn resolve_index(field: &str, len: usize, line: usize) -> Result<usize, AssetError> {
    let index: i64 = field.parse().map_err(|_| AssetError::Parse {
        line,
        message: format!("invalid index '{}'", field),
    })?;
    let resolved = if index > 0 { index - 1 } else { len as i64 + index };
    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(AssetError::IndexOutOfRange { line, index });
    }
    Ok(resolved as usize)
}

fn parse_face_vertex(field: &str, n_pos: usize, n_norm: usize, line: usize) -> Result<FaceVertex, AssetError> {
    let mut parts = field.split('/');
    let position = resolve_index(parts.next().unwrap_or(""), n_pos, line)?;
    let _texcoord = parts.next();
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(n, n_norm, line)?),
        _ => None,
    };
    Ok(FaceVertex { position, normal })
}

fn push_triangle(mesh: &mut ObjMesh, corners: [FaceVertex; 3], positions: &[Vec3], normals: &[Vec3]) {
    let p = corners.map(|c| positions[c.position]);
    let flat = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();
    for (corner, pos) in corners.iter().zip(p) {
        mesh.positions.push(pos);
        mesh.normals.push(corner.normal.map_or(flat, |n| normals[n]));
    }
}
