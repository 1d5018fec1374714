//! Equations of motion for the planar double pendulum.
//!
//! With `δ = a2 − a1`:
//!
//! ```text
//! den1 = (m1+m2)·l1 − m2·l1·cos²δ
//! den2 = (l2/l1)·den1
//!
//! dda1 = [ m2·l1·da1²·sinδ·cosδ + m2·g·sin(a2)·cosδ
//!          + m2·l2·da2²·sinδ − (m1+m2)·g·sin(a1) ] / den1
//!
//! dda2 = [ −m2·l2·da2²·sinδ·cosδ + (m1+m2)·g·sin(a1)·cosδ
//!          − (m1+m2)·l1·da1²·sinδ − (m1+m2)·g·sin(a2) ] / den2
//! ```
//!
//! `den1` equals `l1·(m1 + m2·sin²δ)`, so it only vanishes when `l1` or `m1`
//! does. Nothing here guards against that; [`Integrator`](crate::Integrator)
//! detects the non-finite fallout instead.

use crate::math::{cos, sin};
use crate::params::Parameters;
use crate::state::{Derivative, State};

/// Evaluates the time derivative of `state`.
///
/// The angle rates are the current angular velocities; the velocity rates
/// are the angular accelerations above. Pure: reads its inputs only.
///
/// # Example
///
/// ```rust
/// use pendulum::{dynamics, Parameters, State};
///
/// // Hanging straight down at rest is an equilibrium
/// let d = dynamics::derive(&State::at_rest(0.0, 0.0), &Parameters::default());
/// assert_eq!(d.dda1, 0.0);
/// assert_eq!(d.dda2, 0.0);
/// ```
pub fn derive(state: &State, params: &Parameters) -> Derivative {
    let State { a1, da1, a2, da2 } = *state;
    let Parameters { m1, m2, l1, l2, g } = *params;
    let m = m1 + m2;

    let delta = a2 - a1;
    let (sin_d, cos_d) = (sin(delta), cos(delta));

    let den1 = m * l1 - m2 * l1 * cos_d * cos_d;
    let den2 = (l2 / l1) * den1;

    let dda1 = (m2 * l1 * da1 * da1 * sin_d * cos_d
        + m2 * g * sin(a2) * cos_d
        + m2 * l2 * da2 * da2 * sin_d
        - m * g * sin(a1))
        / den1;

    let dda2 = (-m2 * l2 * da2 * da2 * sin_d * cos_d
        + m * g * sin(a1) * cos_d
        - m * l1 * da1 * da1 * sin_d
        - m * g * sin(a2))
        / den2;

    Derivative::new(da1, dda1, da2, dda2)
}
