use serde::{Deserialize, Serialize};
use crate::assets::error::AssetError;

/// Asset manifest describing the textures and meshes a game uses.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Image files, in texture-id order.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    /// Wavefront OBJ files the host fetches and hands over as text.
    #[serde(default)]
    pub meshes: Vec<MeshDescriptor>,
}

/// Describes a single texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup name used by game code (e.g., "earth").
    pub name: String,
    /// Relative path to the image file (e.g., "textures/earth.png").
    pub path: String,
}

/// Describes a mesh file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub name: String,
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn mesh_names(&self) -> impl Iterator<Item = &str> {
        self.meshes.iter().map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "textures": [
                { "name": "earth", "path": "textures/earth.png" },
                { "name": "circle", "path": "circle.png" }
            ],
            "meshes": [
                { "name": "Rock1", "path": "rocks/Rock1.obj" }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures[1].path, "circle.png");
        assert_eq!(manifest.mesh_names().collect::<Vec<_>>(), vec!["Rock1"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
        assert!(manifest.meshes.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = AssetManifest::from_json("{ textures: ").unwrap_err();
        assert!(matches!(err, AssetError::Manifest(_)));
    }
}
