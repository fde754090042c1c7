pub mod lighting;
pub mod motion;
pub mod render;

pub use motion::MotionSystem;
pub use render::build_render_frame;
