use std::collections::HashMap;
use crate::assets::error::AssetError;
use crate::assets::obj::parse_obj;
use crate::geometry::{GeometryId, GeometryStore};

/// Named meshes loaded from OBJ text, in load order.
///
/// One file may hold several objects; each becomes its own geometry.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    by_name: HashMap<String, Vec<GeometryId>>,
    order: Vec<String>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and store its objects under `name`. Reloading a name
    /// replaces its geometry list.
    pub fn load_obj(
        &mut self,
        name: &str,
        text: &str,
        geometries: &mut GeometryStore,
    ) -> Result<&[GeometryId], AssetError> {
        let meshes = parse_obj(text)?;
        let ids: Vec<GeometryId> = meshes
            .into_iter()
            .map(|mesh| geometries.insert(mesh.into_geometry()))
            .collect();
        log::info!("loaded mesh '{}' ({} objects)", name, ids.len());

        if !self.by_name.contains_key(name) {
            self.order.push(name.to_string());
        }
        let slot = self.by_name.entry(name.to_string()).or_default();
        *slot = ids;
        Ok(slot)
    }

    pub fn get(&self, name: &str) -> Option<&[GeometryId]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every loaded geometry, files in load order, objects in file order.
    pub fn all(&self) -> Vec<GeometryId> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .flatten()
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRI: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    const TWO: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\no a\nf 1 2 3\no b\nf 1 3 2\n";

    #[test]
    fn loads_objects_in_order() {
        let mut geometries = GeometryStore::new();
        let mut library = MeshLibrary::new();
        library.load_obj("Rock2", TWO, &mut geometries).unwrap();
        library.load_obj("Rock1", TRI, &mut geometries).unwrap();

        assert_eq!(library.get("Rock2").unwrap().len(), 2);
        assert_eq!(library.all(), vec![GeometryId(0), GeometryId(1), GeometryId(2)]);
        assert_eq!(geometries.len(), 3);
    }

    #[test]
    fn failed_load_leaves_library_untouched() {
        let mut geometries = GeometryStore::new();
        let mut library = MeshLibrary::new();
        assert!(library.load_obj("Rock1", "f 1 2 3\n", &mut geometries).is_err());
        assert!(!library.contains("Rock1"));
        assert!(geometries.is_empty());
    }
}
