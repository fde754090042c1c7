use wasm_bindgen::prelude::*;

pub mod asteroid_belt;
pub mod bodies;
pub mod config;
pub mod controls;
pub mod ecliptic;
pub mod game;
pub mod nebula;
pub mod orbit;
pub mod planet;
pub mod starfield;
pub mod sun;

use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
