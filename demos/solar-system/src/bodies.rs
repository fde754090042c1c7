/// Planet table: sizes, orbit radii, default speeds, textures and satellites.
///
/// Radii are in scene units before `DISTANCE_SCALE`; speeds are radians per step.

use std::f32::consts::FRAC_PI_2;

/// Default multiplier applied to every planet's orbit radius.
pub const DISTANCE_SCALE: f32 = 1.5;

pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

/// Angular rate of a moon's pivot, in radians per unit of animation time.
pub const MOON_ORBIT_RATE: f32 = 5.0;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 1.0;
pub const SUN_EMISSIVE: u32 = 0xff0000;
pub const SUN_GLOW: u32 = 0xffff99;
pub const SUN_RIM_SCALE: f32 = 1.01;
pub const SUN_LIGHT_INTENSITY: f32 = 10.0;
pub const CORONA_RADIUS: f32 = 0.9;
/// Corona noise sampling scale and displacement depth.
pub const CORONA_NOISE_FREQUENCY: f32 = 3.0;
pub const CORONA_NOISE_AMPLITUDE: f32 = 0.4;

// ── Planets ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonSpec {
    pub name: &'static str,
    pub size: f32,
    /// Distance from the planet's centre.
    pub distance: f32,
    pub texture: &'static str,
}

/// A flattened torus around a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Scale along the torus axis before tilting.
    pub flatten: f32,
    /// Rotation about X, in radians.
    pub tilt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub size: f32,
    /// Orbit radius before distance scaling.
    pub orbit: f32,
    /// Default angular speed, radians per step.
    pub speed: f32,
    /// Texture name in the asset manifest.
    pub texture: &'static str,
    pub moon: Option<MoonSpec>,
    pub ring: Option<RingSpec>,
}

impl PlanetSpec {
    pub fn distance(&self, scale: f32) -> f32 {
        self.orbit * scale
    }
}

const fn planet(name: &'static str, size: f32, orbit: f32, speed: f32, texture: &'static str) -> PlanetSpec {
    PlanetSpec {
        name,
        size,
        orbit,
        speed,
        texture,
        moon: None,
        ring: None,
    }
}

pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    planet("Mercury", 0.1, 1.25, 0.04, "mercury"),
    planet("Venus", 0.2, 1.65, 0.015, "venus"),
    PlanetSpec {
        moon: Some(MoonSpec {
            name: "Moon",
            size: 0.075,
            distance: 0.4,
            texture: "moon",
        }),
        ..planet("Earth", 0.225, 2.0, 0.01, "earth")
    },
    planet("Mars", 0.15, 2.25, 0.008, "mars"),
    planet("Jupiter", 0.4, 3.0, 0.002, "jupiter"),
    PlanetSpec {
        ring: Some(RingSpec {
            radius: 0.6,
            tube: 0.15,
            radial_segments: 8,
            tubular_segments: 64,
            flatten: 0.1,
            tilt: FRAC_PI_2,
        }),
        ..planet("Saturn", 0.35, 3.25, 0.0009, "saturn")
    },
    PlanetSpec {
        ring: Some(RingSpec {
            radius: 0.5,
            tube: 0.05,
            radial_segments: 8,
            tubular_segments: 64,
            flatten: 0.1,
            tilt: 0.0,
        }),
        ..planet("Uranus", 0.3, 3.75, 0.0004, "uranus")
    },
    planet("Neptune", 0.3, 4.25, 0.0001, "neptune"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_are_ordered_outwards() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].orbit < pair[1].orbit, "{} before {}", pair[0].name, pair[1].name);
        }
        assert_eq!(PLANETS[NEPTUNE].name, "Neptune");
    }

    #[test]
    fn only_earth_has_a_moon() {
        let with_moon: Vec<_> = PLANETS.iter().filter(|p| p.moon.is_some()).collect();
        assert_eq!(with_moon.len(), 1);
        assert_eq!(with_moon[0].name, PLANETS[EARTH].name);
    }

    #[test]
    fn ringed_planets() {
        assert!(PLANETS[SATURN].ring.is_some());
        assert!(PLANETS[URANUS].ring.is_some());
        assert_eq!(PLANETS.iter().filter(|p| p.ring.is_some()).count(), 2);
    }

    #[test]
    fn distance_applies_scale() {
        assert!((PLANETS[EARTH].distance(DISTANCE_SCALE) - 3.0).abs() < 1e-6);
        assert!((PLANETS[MERCURY].distance(1.0) - 1.25).abs() < 1e-6);
    }
}
