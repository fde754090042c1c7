pub mod scene;
pub mod time;
