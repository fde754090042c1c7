use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;

/// Index of a texture in the manifest's `textures` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Registry of named textures, built from an AssetManifest.
/// Provides name-based texture lookup for game code.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let textures = manifest
            .textures
            .iter()
            .enumerate()
            .map(|(i, desc)| (desc.name.clone(), TextureId(i as u32)))
            .collect();
        Self { textures }
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
