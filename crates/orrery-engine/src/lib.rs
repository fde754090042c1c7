pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod extensions;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::error::ConfigError;
pub use api::game::{EngineContext, Game, GameConfig, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use assets::{AssetError, AssetManifest, MeshLibrary, TextureId, TextureRegistry};
pub use bridge::protocol::{FrameStats, ProtocolLayout};
pub use components::color::Color;
pub use components::entity::Entity;
pub use components::light::LightComponent;
pub use components::line::LineComponent;
pub use components::mesh::{Material, MeshComponent, Side};
pub use components::motion::{Motion, SurfaceNoise};
pub use components::points::PointsComponent;
pub use components::sprite::SpriteComponent;
pub use core::scene::Scene;
pub use core::time::{AnimationClock, FixedTimestep};
pub use extensions::{LocalTransform, TransformGraph};
pub use geometry::{icosphere, torus, Geometry, GeometryId, GeometryStore};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraRig, CameraUniform, OrbitControls, PerspectiveCamera};
pub use renderer::fresnel::{FresnelParams, FRESNEL_WGSL};
pub use renderer::instance::RenderFrame;
pub use systems::motion::MotionSystem;
pub use systems::render::build_render_frame;
