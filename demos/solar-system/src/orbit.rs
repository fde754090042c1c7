/// Circular orbital kinematics: an angle advanced by a fixed speed each step.

use glam::Vec3;

/// Slider range and granularity for orbital speeds, radians per step.
pub const SPEED_MIN: f32 = 0.0001;
pub const SPEED_MAX: f32 = 0.05;
pub const SPEED_STEP: f32 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub name: &'static str,
    pub angle: f32,
    pub speed: f32,
    pub distance: f32,
}

impl OrbitState {
    pub fn new(name: &'static str, speed: f32, distance: f32) -> Self {
        Self {
            name,
            angle: 0.0,
            speed,
            distance,
        }
    }

    /// Move one step along the orbit.
    pub fn advance(&mut self) {
        self.angle += self.speed;
    }

    /// Position on the orbit circle in the XZ plane.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.distance,
            0.0,
            self.angle.sin() * self.distance,
        )
    }

    /// Set a new speed from the slider. The value is clamped to
    /// `[SPEED_MIN, SPEED_MAX]` and snapped to `SPEED_STEP`.
    /// Non-finite values are ignored. Returns the speed now in effect.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        if speed.is_finite() {
            self.speed = snap_speed(speed);
        }
        self.speed
    }

    /// Slider label, e.g. `"Earth Speed: "`.
    pub fn label(&self) -> String {
        format!("{} Speed: ", self.name)
    }

    /// Label followed by the speed with four decimals.
    pub fn speed_label(&self) -> String {
        format!("{}{:.4}", self.label(), self.speed)
    }
}

pub fn snap_speed(speed: f32) -> f32 {
    let clamped = speed.clamp(SPEED_MIN, SPEED_MAX);
    let steps = ((clamped - SPEED_MIN) / SPEED_STEP).round();
    (SPEED_MIN + steps * SPEED_STEP).clamp(SPEED_MIN, SPEED_MAX)
}
