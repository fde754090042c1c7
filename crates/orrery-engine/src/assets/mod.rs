pub mod error;
pub mod library;
pub mod manifest;
pub mod obj;
pub mod registry;

pub use error::AssetError;
pub use library::MeshLibrary;
pub use manifest::AssetManifest;
pub use obj::{parse_obj, ObjMesh};
pub use registry::{TextureId, TextureRegistry};
