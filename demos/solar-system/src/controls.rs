/// Host controls: custom input kinds, outgoing state events and the JSON
/// panel description the host turns into DOM.

use serde::Serialize;

use crate::config::CameraMode;
use crate::orbit::{OrbitState, SPEED_MAX, SPEED_MIN, SPEED_STEP};

// ── Custom event kinds from the host ─────────────────────────────────

pub const TOGGLE_PAUSE: u32 = 1;
/// a = planet index, b = speed.
pub const SET_SPEED: u32 = 2;
/// a = 0 animated camera, 1 orbit controls.
pub const SET_CAMERA_MODE: u32 = 3;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = 1 when paused.
pub const EVENT_PAUSED: f32 = 1.0;
/// a = planet index, b = speed.
pub const EVENT_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    SetSpeed { planet: usize, speed: f32 },
    SetCameraMode(CameraMode),
}

impl Command {
    /// Decode a custom event. `planet_count` bounds the planet index.
    pub fn from_custom(kind: u32, a: f32, b: f32, planet_count: usize) -> Option<Self> {
        match kind {
            TOGGLE_PAUSE => Some(Command::TogglePause),
            SET_SPEED => {
                let planet = planet_index(a, planet_count)?;
                Some(Command::SetSpeed { planet, speed: b })
            }
            SET_CAMERA_MODE => CameraMode::from_code(a).map(Command::SetCameraMode),
            _ => None,
        }
    }
}

fn planet_index(a: f32, planet_count: usize) -> Option<usize> {
    if !a.is_finite() || a < 0.0 {
        return None;
    }
    let index = a.round() as usize;
    (index < planet_count).then_some(index)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauseButton {
    pub label: &'static str,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedSlider {
    pub index: usize,
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub value: f32,
    /// Current value with four decimals.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanel {
    pub pause: PauseButton,
    pub camera_mode: CameraMode,
    pub sliders: Vec<SpeedSlider>,
}

impl ControlPanel {
    pub fn new(paused: bool, camera_mode: CameraMode, orbits: &[OrbitState]) -> Self {
        Self {
            pause: PauseButton {
                label: if paused { "Resume" } else { "Pause" },
                paused,
            },
            camera_mode,
            sliders: orbits
                .iter()
                .enumerate()
                .map(|(index, orbit)| SpeedSlider {
                    index,
                    label: orbit.label(),
                    min: SPEED_MIN,
                    max: SPEED_MAX,
                    step: SPEED_STEP,
                    value: orbit.speed,
                    display: format!("{:.4}", orbit.speed),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
