pub mod camera;
pub mod fresnel;
pub mod instance;

pub use camera::{CameraRig, CameraUniform, OrbitControls, PerspectiveCamera};
pub use fresnel::{FresnelParams, FRESNEL_WGSL};
pub use instance::{
    FrameCapacity, LightRecord, LineVertex, MeshInstance, PointVertex, RenderFrame, SpriteInstance,
};
