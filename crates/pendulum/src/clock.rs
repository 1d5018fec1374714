//! Turns host frame timestamps into integrator time steps.

use crate::integrator::MAX_FRAME_DT;

/// Time step used when a frame reports no elapsed time.
pub const FALLBACK_FRAME_DT: f64 = 0.016;

/// Converts per-frame timestamps (milliseconds, as handed out by an
/// animation-frame scheduler) into a clamped `dt` in seconds.
///
/// The clock reads no time source itself; the host supplies every timestamp.
///
/// # Example
///
/// ```rust
/// use pendulum::FrameClock;
///
/// let mut clock = FrameClock::new();
/// clock.tick(1000.0);
///
/// // 20 ms later
/// assert!((clock.tick(1020.0) - 0.02).abs() < 1e-12);
///
/// // A 5 second stall is capped
/// assert_eq!(clock.tick(6020.0), 0.05);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    /// Creates a clock whose previous frame is at time zero.
    #[inline]
    pub const fn new() -> Self {
        Self { last_ms: 0.0 }
    }

    /// Records a frame timestamp and returns the time step for it.
    ///
    /// - elapsed time of exactly zero, or NaN, yields [`FALLBACK_FRAME_DT`]
    /// - anything above [`MAX_FRAME_DT`] is capped to it
    /// - there is no lower bound; a timestamp that goes backwards yields a
    ///   negative step
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let raw = (timestamp_ms - self.last_ms) / 1000.0;
        self.last_ms = timestamp_ms;

        let raw = if raw == 0.0 || raw.is_nan() {
            FALLBACK_FRAME_DT
        } else {
            raw
        };
        raw.min(MAX_FRAME_DT)
    }

    /// Timestamp of the most recent frame, in milliseconds.
    #[inline]
    pub const fn last_timestamp(&self) -> f64 {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_measures_from_zero() {
        let mut clock = FrameClock::new();
        assert!((clock.tick(16.0) - 0.016).abs() < 1e-12);
        assert_eq!(clock.last_timestamp(), 16.0);
    }

    #[test]
    fn test_repeated_timestamp_uses_fallback() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(500.0), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_nan_timestamp_uses_fallback() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(f64::NAN), FALLBACK_FRAME_DT);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(60_000.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_backwards_timestamp_is_negative() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        assert!((clock.tick(990.0) + 0.01).abs() < 1e-12);
    }
}
