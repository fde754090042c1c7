pub mod color;
pub mod entity;
pub mod light;
pub mod line;
pub mod mesh;
pub mod motion;
pub mod points;
pub mod sprite;
