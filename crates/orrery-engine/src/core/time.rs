/// Fixed timestep accumulator.
/// Ensures scene logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Scale applied to elapsed milliseconds to obtain the animation time
/// handed to motions (`t * 0.0002` with `t` in ms).
pub const ANIMATION_TIME_SCALE: f64 = 0.0002;

/// Pausable clock driving every time-based motion.
///
/// Only running time accumulates, so resuming continues exactly where the
/// scene stopped instead of jumping ahead by the paused duration.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    elapsed: f64,
    paused: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Returns false (and does nothing) while paused.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed += dt as f64;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip the paused flag. Returns the new paused state.
    pub fn toggle(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Running seconds accumulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Time value passed to `Motion` updates.
    pub fn animation_time(&self) -> f32 {
        (self.elapsed * 1000.0 * ANIMATION_TIME_SCALE) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-5.0), 0);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn clock_stops_while_paused() {
        let mut clock = AnimationClock::new();
        assert!(clock.advance(1.0));
        assert!(clock.toggle());
        assert!(!clock.advance(1.0));
        assert!((clock.elapsed() - 1.0).abs() < 1e-9);

        clock.resume();
        assert!(clock.advance(0.5));
        assert!((clock.elapsed() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn animation_time_matches_millisecond_scale() {
        let mut clock = AnimationClock::new();
        clock.advance(5.0);
        // 5000 ms * 0.0002
        assert!((clock.animation_time() - 1.0).abs() < 1e-6);
    }
}
