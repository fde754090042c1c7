/// Scene configuration, supplied by the host as JSON before init.
///
/// Every field has a default, so `{}` is a valid document.

use orrery_engine::ConfigError;
use serde::{Deserialize, Serialize};

use crate::bodies::DISTANCE_SCALE;
use crate::nebula::NebulaParams;

/// Highest icosphere subdivision accepted (about 84k vertices per sphere).
pub const MAX_DETAIL: u32 = 36;
pub const MAX_STARS: usize = 100_000;

/// What drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Slow circle around the sun, paused with the scene.
    #[default]
    Animated,
    /// Pointer-driven orbit controls.
    Orbit,
}

impl CameraMode {
    /// Decode the `a` value of a camera-mode custom event.
    pub fn from_code(code: f32) -> Option<Self> {
        if !code.is_finite() {
            return None;
        }
        match code.round() as i32 {
            0 => Some(CameraMode::Animated),
            1 => Some(CameraMode::Orbit),
            _ => None,
        }
    }

    pub fn code(self) -> f32 {
        match self {
            CameraMode::Animated => 0.0,
            CameraMode::Orbit => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarConfig {
    /// Seed for every procedural placement (belt, guide lines, stars, nebulae).
    pub seed: u64,
    /// Multiplier applied to planet orbit radii.
    pub distance_scale: f32,
    pub num_stars: usize,
    pub star_size: f32,
    pub sun_detail: u32,
    pub planet_detail: u32,
    pub camera_mode: CameraMode,
    pub nebulae: Vec<NebulaParams>,
    /// Rock meshes the host must load; one belt layer per object found.
    pub rocks: Vec<String>,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            distance_scale: DISTANCE_SCALE,
            num_stars: 2500,
            star_size: 0.5,
            sun_detail: 6,
            planet_detail: 12,
            camera_mode: CameraMode::Animated,
            nebulae: vec![
                NebulaParams::layer(0.6, -30.5),
                NebulaParams::layer(0.0, 30.5),
            ],
            rocks: vec!["Rock1".into(), "Rock2".into(), "Rock3".into()],
        }
    }
}

impl SolarConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SolarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "distance_scale must be positive, got {}",
                self.distance_scale
            )));
        }
        if !self.star_size.is_finite() || self.star_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "star_size must be positive, got {}",
                self.star_size
            )));
        }
        if self.num_stars > MAX_STARS {
            return Err(ConfigError::Invalid(format!(
                "num_stars {} exceeds {}",
                self.num_stars, MAX_STARS
            )));
        }
        for (field, detail) in [("sun_detail", self.sun_detail), ("planet_detail", self.planet_detail)] {
            if detail > MAX_DETAIL {
                return Err(ConfigError::Invalid(format!(
                    "{} {} exceeds {}",
                    field, detail, MAX_DETAIL
                )));
            }
        }
        for (i, layer) in self.nebulae.iter().enumerate() {
            layer
                .validate()
                .map_err(|msg| ConfigError::Invalid(format!("nebulae[{}]: {}", i, msg)))?;
        }
        if self.rocks.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid("rock mesh names must not be empty".into()));
        }
        Ok(())
    }

    /// Total nebula sprites across all layers.
    pub fn sprite_count(&self) -> usize {
        self.nebulae.iter().map(|layer| layer.num_sprites).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SolarConfig::from_json("{}").unwrap();
        assert_eq!(config, SolarConfig::default());
        assert_eq!(config.num_stars, 2500);
        assert_eq!(config.rocks, vec!["Rock1", "Rock2", "Rock3"]);
        assert_eq!(config.nebulae.len(), 2);
        assert_eq!(config.sprite_count(), 20);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = SolarConfig::from_json(
            r#"{ "seed": 7, "num_stars": 100, "camera_mode": "orbit", "rocks": [] }"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.num_stars, 100);
        assert_eq!(config.camera_mode, CameraMode::Orbit);
        assert!(config.rocks.is_empty());
        assert_eq!(config.distance_scale, DISTANCE_SCALE);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SolarConfig::from_json("{ seed: }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SolarConfig::from_json(r#"{ "camera_mode": "fly" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for json in [
            r#"{ "distance_scale": 0 }"#,
            r#"{ "distance_scale": -1.5 }"#,
            r#"{ "planet_detail": 100 }"#,
            r#"{ "num_stars": 1000000 }"#,
            r#"{ "rocks": ["Rock1", " "] }"#,
            r#"{ "nebulae": [{ "opacity": 2.0 }] }"#,
        ] {
            assert!(
                matches!(SolarConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{} should be invalid",
                json
            );
        }
    }

    #[test]
    fn camera_mode_codes() {
        assert_eq!(CameraMode::from_code(0.0), Some(CameraMode::Animated));
        assert_eq!(CameraMode::from_code(1.0), Some(CameraMode::Orbit));
        assert_eq!(CameraMode::from_code(2.0), None);
        assert_eq!(CameraMode::from_code(f32::NAN), None);
        assert_eq!(CameraMode::Orbit.code(), 1.0);
    }
}
