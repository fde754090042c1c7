// extensions/mod.rs
//
// Optional systems decoupled from Entity/Scene internals.
// Scenes opt in by creating these alongside their Scene.

pub mod transform;

pub use transform::{LocalTransform, TransformGraph};
