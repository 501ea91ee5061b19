//! Frame clocks: where the renderer gets its elapsed time from.

use std::time::Instant;

/// Monotonic elapsed-time source for the simulation
pub trait FrameClock {
    /// Restart from zero (called on every mount)
    fn reset(&mut self);

    /// Seconds since the last reset
    fn elapsed_s(&self) -> f32;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn reset(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed_s(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-driven clock for tests and offline capture
///
/// Time only moves forward: setting an earlier time is ignored.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed_s: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `time_s` if it is not earlier than the current time
    pub fn set(&mut self, time_s: f32) {
        if time_s.is_finite() && time_s > self.elapsed_s {
            self.elapsed_s = time_s;
        }
    }

    pub fn advance(&mut self, delta_s: f32) {
        self.set(self.elapsed_s + delta_s);
    }
}

impl FrameClock for ManualClock {
    fn reset(&mut self) {
        self.elapsed_s = 0.0;
    }

    fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotonic() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.elapsed_s(), 0.0);

        clock.set(2.0);
        clock.advance(0.5);
        assert_eq!(clock.elapsed_s(), 2.5);

        clock.set(1.0);
        clock.advance(-3.0);
        clock.set(f32::NAN);
        assert_eq!(clock.elapsed_s(), 2.5);

        clock.reset();
        assert_eq!(clock.elapsed_s(), 0.0);
    }

    #[test]
    fn system_clock_starts_near_zero() {
        let mut clock = SystemClock::new();
        clock.reset();
        let t = clock.elapsed_s();
        assert!((0.0..1.0).contains(&t));
        assert!(clock.elapsed_s() >= t);
    }
}
