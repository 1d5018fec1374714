//! Sub-stepped fourth-order Runge-Kutta integration.

use tracing::{trace, warn};

use crate::dynamics::derive;
use crate::error::{PendulumError, Result};
use crate::params::Parameters;
use crate::state::State;

/// Number of RK4 sub-steps taken per frame.
pub const SUB_STEPS: u32 = 5;

/// Largest frame time step the integrator will take, in seconds.
///
/// A longer stall (a backgrounded window, a debugger pause) is advanced by
/// this much instead of jumping the whole gap at once.
pub const MAX_FRAME_DT: f64 = 0.05;

/// Advances a [`State`] through time with classical RK4.
///
/// Each frame's `dt` is clamped to [`MAX_FRAME_DT`] and split into
/// [`SUB_STEPS`] equal sub-steps, each a full four-evaluation RK4 update of
/// `(a1, da1, a2, da2)`. A single RK4 step at frame rate drifts visibly on
/// this chaotic system; five sub-steps keep the drift far below what a
/// viewer notices.
///
/// The integrator holds no state of its own between frames.
///
/// # Example
///
/// ```rust
/// use pendulum::{fps, Integrator, Parameters, State};
///
/// let integrator = Integrator::new();
/// let params = Parameters::default();
/// let mut state = State::default();
///
/// for _ in 0..60 {
///     integrator.step(&mut state, &params, fps(60)).unwrap();
/// }
/// assert!(state.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integrator {
    sub_steps: u32,
}

impl Integrator {
    /// Creates the integrator with the fixed sub-step count.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sub_steps: SUB_STEPS,
        }
    }

    /// Number of sub-steps per frame.
    #[inline]
    pub const fn sub_steps(&self) -> u32 {
        self.sub_steps
    }

    /// Advances `state` by one frame of length `dt` (clamped to
    /// [`MAX_FRAME_DT`]).
    ///
    /// No lower bound is applied: `dt == 0` leaves the state unchanged, and a
    /// negative `dt` integrates backwards.
    ///
    /// # Errors
    ///
    /// - [`PendulumError::InvalidTimeStep`] if `dt` is NaN or negative
    ///   infinity. The state is not touched. Positive infinity is clamped
    ///   like any other stall.
    /// - [`PendulumError::NonFiniteState`] if any sub-step produces NaN or
    ///   infinity, which happens near singular configurations. The state is
    ///   restored to its value on entry.
    pub fn step(&self, state: &mut State, params: &Parameters, dt: f64) -> Result<()> {
        if dt.is_nan() || dt == f64::NEG_INFINITY {
            return Err(PendulumError::InvalidTimeStep(dt));
        }
        let dt = dt.min(MAX_FRAME_DT);
        let h = dt / f64::from(self.sub_steps);

        let mut next = *state;
        for sub_step in 0..self.sub_steps {
            next = rk4(&next, params, h);
            if !next.is_finite() {
                warn!(
                    sub_step,
                    dt,
                    a1 = state.a1,
                    a2 = state.a2,
                    "Integration diverged; state restored"
                );
                return Err(PendulumError::NonFiniteState);
            }
        }

        trace!(dt, a1 = next.a1, a2 = next.a2, "Frame integrated");
        *state = next;
        Ok(())
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

/// One classical RK4 update of length `h`.
///
/// ```text
/// k1 = f(y)
/// k2 = f(y + h/2·k1)
/// k3 = f(y + h/2·k2)
/// k4 = f(y + h·k3)
/// y' = y + h/6·(k1 + 2·k2 + 2·k3 + k4)
/// ```
pub fn rk4(state: &State, params: &Parameters, h: f64) -> State {
    let k1 = derive(state, params);
    let k2 = derive(&(*state + k1 * (0.5 * h)), params);
    let k3 = derive(&(*state + k2 * (0.5 * h)), params);
    let k4 = derive(&(*state + k3 * h), params);

    *state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Returns a time delta for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use pendulum::fps;
///
/// assert_eq!(fps(50), 0.02);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_fps() {
        assert!(approx_eq(fps(60), 1.0 / 60.0));
        assert!(approx_eq(fps(30), 1.0 / 30.0));
    }

    #[test]
    fn test_sub_step_count_is_fixed() {
        assert_eq!(Integrator::new().sub_steps(), 5);
        assert_eq!(Integrator::default(), Integrator::new());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut s = State::new(0.3, 1.0, -0.4, 2.0);
        Integrator::new()
            .step(&mut s, &Parameters::default(), 0.0)
            .unwrap();
        assert_eq!(s, State::new(0.3, 1.0, -0.4, 2.0));
    }

    #[test]
    fn test_equilibrium_stays_put() {
        let mut s = State::at_rest(0.0, 0.0);
        for _ in 0..100 {
            Integrator::new()
                .step(&mut s, &Parameters::default(), fps(60))
                .unwrap();
        }
        assert_eq!(s, State::at_rest(0.0, 0.0));
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let params = Parameters::default();
        let integrator = Integrator::new();

        let mut stalled = State::default();
        integrator.step(&mut stalled, &params, 10.0).unwrap();

        let mut capped = State::default();
        integrator.step(&mut capped, &params, MAX_FRAME_DT).unwrap();

        assert_eq!(stalled, capped);
    }

    #[test]
    fn test_infinite_dt_is_clamped_too() {
        let mut s = State::default();
        Integrator::new()
            .step(&mut s, &Parameters::default(), f64::INFINITY)
            .unwrap();
        assert!(s.is_finite());
    }

    #[test]
    fn test_nan_dt_rejected_without_mutation() {
        let mut s = State::default();
        let err = Integrator::new()
            .step(&mut s, &Parameters::default(), f64::NAN)
            .unwrap_err();
        assert!(matches!(err, PendulumError::InvalidTimeStep(_)));
        assert_eq!(s, State::default());
    }

    #[test]
    fn test_negative_dt_integrates_backwards() {
        let params = Parameters::default();
        let integrator = Integrator::new();
        let mut s = State::default();

        integrator.step(&mut s, &params, fps(60)).unwrap();
        assert!(s.da1 != 0.0);
        integrator.step(&mut s, &params, -fps(60)).unwrap();

        let start = State::default();
        for (got, want) in [
            (s.a1, start.a1),
            (s.da1, start.da1),
            (s.a2, start.a2),
            (s.da2, start.da2),
        ] {
            assert!((got - want).abs() < 1e-8, "{got} vs {want}");
        }

        let err = integrator
            .step(&mut s, &params, f64::NEG_INFINITY)
            .unwrap_err();
        assert!(matches!(err, PendulumError::InvalidTimeStep(_)));
    }

    #[test]
    fn test_singular_configuration_restores_state() {
        let params = Parameters::new(0.0, 1.0, 1.0, 1.0, 9.8);
        let before = State::new(0.5, 0.1, 0.5, 0.1);
        let mut s = before;
        let err = Integrator::new().step(&mut s, &params, fps(60)).unwrap_err();
        assert_eq!(err, PendulumError::NonFiniteState);
        assert_eq!(s, before);
    }

    #[test]
    fn test_rk4_small_oscillation_period() {
        // Tiny swing with a negligible second mass: period ≈ 2π·sqrt(l1/g)
        let params = Parameters::new(1.0, 1e-9, 1.0, 1.0, 9.8);
        let period = 2.0 * core::f64::consts::PI * (params.l1 / params.g).sqrt();
        let h = period / 2000.0;

        let mut s = State::at_rest(1e-3, 1e-3);
        for _ in 0..2000 {
            s = rk4(&s, &params, h);
        }
        assert!((s.a1 - 1e-3).abs() < 1e-7, "a1 after one period: {}", s.a1);
    }

    #[test]
    fn test_energy_drift_one_second() {
        let params = Parameters::default();
        let mut s = State::new(1.0, 0.0, -0.5, 0.0);
        let e0 = energy::total(&s, &params);
        for _ in 0..60 {
            Integrator::new().step(&mut s, &params, fps(60)).unwrap();
        }
        assert!((energy::total(&s, &params) - e0).abs() < 1e-5);
    }
}
