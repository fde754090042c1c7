//! CPU-side triangle geometry shared by meshes.
//!
//! Geometries are uploaded by the host once and re-uploaded whenever their
//! version changes (the sun corona is rewritten every frame).

mod icosphere;
mod torus;

pub use icosphere::icosphere;
pub use torus::torus;

use glam::Vec3;

/// Floats per interleaved vertex: x, y, z, nx, ny, nz.
pub const GEOMETRY_VERTEX_FLOATS: usize = 6;

/// Index into a `GeometryStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometryId(pub u32);

/// Triangle geometry. Empty `indices` means a non-indexed triangle list.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    version: u32,
    interleaved: Vec<f32>,
    stale: bool,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        let mut geometry = Self {
            positions,
            normals,
            indices,
            version: 1,
            interleaved: Vec::new(),
            stale: true,
        };
        geometry.refresh();
        geometry
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Bumped on every mutation so the host knows to re-upload.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn mark_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.stale = true;
    }

    /// Rebuild the interleaved upload buffer if the geometry changed.
    /// Returns true when a rebuild happened.
    pub fn refresh(&mut self) -> bool {
        if !self.stale {
            return false;
        }
        self.interleaved.clear();
        self.interleaved.reserve(self.positions.len() * GEOMETRY_VERTEX_FLOATS);
        for (p, n) in self.positions.iter().zip(&self.normals) {
            self.interleaved.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        self.stale = false;
        true
    }

    /// Interleaved `[x, y, z, nx, ny, nz]` vertex data as of the last refresh.
    pub fn interleaved(&self) -> &[f32] {
        &self.interleaved
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.interleaved.as_ptr()
    }

    pub fn indices_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }

    /// Largest distance of any vertex from the local origin.
    pub fn bounding_radius(&self) -> f32 {
        self.positions.iter().map(|p| p.length()).fold(0.0, f32::max)
    }
}

/// Owner of every geometry in the scene.
#[derive(Debug, Default)]
pub struct GeometryStore {
    geometries: Vec<Geometry>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.geometries.len() as u32);
        self.geometries.push(geometry);
        id
    }

    pub fn get(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    /// Mutable access. The geometry is marked changed, so the next `sync`
    /// rebuilds it and the host re-uploads it.
    pub fn get_mut(&mut self, id: GeometryId) -> Option<&mut Geometry> {
        let geometry = self.geometries.get_mut(id.0 as usize)?;
        geometry.mark_changed();
        Some(geometry)
    }

    /// Refresh every changed geometry. Returns how many were rebuilt.
    pub fn sync(&mut self) -> usize {
        self.geometries
            .iter_mut()
            .map(Geometry::refresh)
            .filter(|&rebuilt| rebuilt)
            .count()
    }

    /// Sum of all versions; changes whenever any geometry changes.
    pub fn revision(&self) -> u32 {
        self.geometries
            .iter()
            .fold(0u32, |acc, g| acc.wrapping_add(g.version))
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeometryId, &Geometry)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryId(i as u32), g))
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        Geometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z; 3],
            Vec::new(),
        )
    }

    #[test]
    fn interleaves_positions_and_normals() {
        let g = triangle();
        assert_eq!(g.interleaved().len(), 3 * GEOMETRY_VERTEX_FLOATS);
        assert_eq!(&g.interleaved()[6..12], &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.triangle_count(), 1);
    }

    #[test]
    fn mutation_bumps_version_and_sync_rebuilds() {
        let mut store = GeometryStore::new();
        let id = store.insert(triangle());
        let before = store.revision();

        let g = store.get_mut(id).unwrap();
        g.positions[1] = Vec3::new(2.0, 0.0, 0.0);

        assert_ne!(store.revision(), before);
        assert_eq!(store.sync(), 1);
        assert_eq!(store.sync(), 0);
        assert_eq!(store.get(id).unwrap().interleaved()[6], 2.0);
    }

    #[test]
    fn get_mut_bumps_version_once() {
        let mut store = GeometryStore::new();
        let id = store.insert(triangle());
        assert_eq!(store.get(id).unwrap().version(), 1);
        store.get_mut(id).unwrap();
        assert_eq!(store.get(id).unwrap().version(), 2);
        assert_eq!(store.sync(), 1);
    }

    #[test]
    fn unknown_id_is_none() {
        let mut store = GeometryStore::new();
        assert!(store.get(GeometryId(3)).is_none());
        assert!(store.get_mut(GeometryId(3)).is_none());
        assert_eq!(store.revision(), 0);
    }
}
