//! Mechanical energy of the double pendulum and the rescaling that keeps it
//! fixed across parameter edits.
//!
//! Two potential energies are provided. They differ by a constant:
//!
//! - [`potential`]: `−(m1+m2)·g·l1·cos(a1) − m2·g·l2·cos(a2)`. This is the
//!   conservation reference; [`total`] and [`rescale`] use it, and so must
//!   anything that captures a target energy.
//! - [`potential_from_rest`]: `(m1+m2)·g·l1·(1−cos a1) + m2·g·l2·(1−cos a2)`,
//!   zero with both bobs hanging. Display only.

use tracing::trace;

use crate::math::{cos, sqrt};
use crate::params::Parameters;
use crate::state::State;

/// Kinetic energy of both bobs.
///
/// ```text
/// KE = ½·m1·(l1·da1)² + ½·m2·[(l1·da1)² + (l2·da2)² + 2·l1·l2·da1·da2·cos(a1−a2)]
/// ```
pub fn kinetic(state: &State, params: &Parameters) -> f64 {
    let v1 = params.l1 * state.da1;
    let v2 = params.l2 * state.da2;
    0.5 * params.m1 * v1 * v1
        + 0.5 * params.m2 * (v1 * v1 + v2 * v2 + 2.0 * v1 * v2 * cos(state.a1 - state.a2))
}

/// Potential energy in the conservation-reference form (pivot at zero).
pub fn potential(state: &State, params: &Parameters) -> f64 {
    -params.total_mass() * params.g * params.l1 * cos(state.a1)
        - params.m2 * params.g * params.l2 * cos(state.a2)
}

/// Potential energy measured from the hanging rest position.
pub fn potential_from_rest(state: &State, params: &Parameters) -> f64 {
    params.total_mass() * params.g * params.l1 * (1.0 - cos(state.a1))
        + params.m2 * params.g * params.l2 * (1.0 - cos(state.a2))
}

/// Total energy in the conservation-reference form: [`kinetic`] + [`potential`].
///
/// # Example
///
/// ```rust
/// use pendulum::{energy, Parameters, State};
///
/// // Both rods horizontal and at rest: zero by this convention
/// let e = energy::total(&State::default(), &Parameters::default());
/// assert!(e.abs() < 1e-12);
/// ```
pub fn total(state: &State, params: &Parameters) -> f64 {
    kinetic(state, params) + potential(state, params)
}

/// Energy breakdown for display, using [`potential_from_rest`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Energy {
    /// Kinetic energy.
    pub kinetic: f64,
    /// Potential energy, zero at rest.
    pub potential: f64,
    /// Sum of the two.
    pub total: f64,
}

impl Energy {
    /// Computes the display breakdown for a state.
    pub fn of(state: &State, params: &Parameters) -> Self {
        let kinetic = kinetic(state, params);
        let potential = potential_from_rest(state, params);
        Self {
            kinetic,
            potential,
            total: kinetic + potential,
        }
    }
}

/// What [`rescale`] did to the velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rescale {
    /// Both velocities were multiplied by this factor.
    Scaled(f64),
    /// The target is below the current potential energy; velocities were zeroed.
    Clamped,
    /// The system is at rest, so there is nothing to scale.
    Unchanged,
}

/// Scales both angular velocities uniformly so that [`total`] equals
/// `target`.
///
/// 1. `KE_target = target − potential(state)`.
/// 2. If `KE_target < 0` the target is unreachable here: zero both
///    velocities and return [`Rescale::Clamped`].
/// 3. If the current kinetic energy is zero, return [`Rescale::Unchanged`].
/// 4. Otherwise multiply both velocities by `sqrt(KE_target / KE_current)`.
///
/// Angles are never touched.
///
/// # Example
///
/// ```rust
/// use pendulum::{energy, Parameters, Rescale, State};
///
/// let params = Parameters::default();
/// let mut state = State::new(0.2, 1.0, -0.1, 0.5);
/// let target = energy::total(&state, &params) + 3.0;
///
/// let outcome = energy::rescale(&mut state, &params, target);
/// assert!(matches!(outcome, Rescale::Scaled(f) if f > 1.0));
/// assert!((energy::total(&state, &params) - target).abs() < 1e-9);
/// ```
pub fn rescale(state: &mut State, params: &Parameters, target: f64) -> Rescale {
    let kinetic_target = target - potential(state, params);
    if kinetic_target < 0.0 {
        state.stop();
        trace!(target_energy = target, kinetic_target, "Rescale target unreachable, velocities zeroed");
        return Rescale::Clamped;
    }

    let kinetic_current = kinetic(state, params);
    if kinetic_current == 0.0 {
        return Rescale::Unchanged;
    }

    let factor = sqrt(kinetic_target / kinetic_current);
    state.da1 *= factor;
    state.da2 *= factor;
    trace!(target_energy = target, factor, "Velocities rescaled");
    Rescale::Scaled(factor)
}
