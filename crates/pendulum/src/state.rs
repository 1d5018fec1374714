//! Generalized coordinates and their time derivative.

use core::f64::consts::FRAC_PI_2;
use core::ops::{Add, Mul};

use crate::angle::wrap_angle;

/// Angles and angular velocities of the two rods.
///
/// Angles are measured from the downward vertical in radians and are never
/// wrapped here: integration needs them continuous. Use
/// [`State::wrapped_angles`] for display.
///
/// # Example
///
/// ```rust
/// use pendulum::State;
///
/// // Both rods horizontal, at rest
/// let start = State::default();
/// assert_eq!(start.da1, 0.0);
///
/// let hanging = State::at_rest(0.0, 0.0);
/// assert_eq!(hanging.a2, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct State {
    /// Angle of rod 1.
    pub a1: f64,
    /// Angular velocity of rod 1.
    pub da1: f64,
    /// Angle of rod 2.
    pub a2: f64,
    /// Angular velocity of rod 2.
    pub da2: f64,
}

impl State {
    /// The configuration a reset returns to: both rods horizontal, at rest.
    pub const START: Self = Self {
        a1: FRAC_PI_2,
        da1: 0.0,
        a2: FRAC_PI_2,
        da2: 0.0,
    };

    /// Creates a state from all four components.
    #[inline]
    pub const fn new(a1: f64, da1: f64, a2: f64, da2: f64) -> Self {
        Self { a1, da1, a2, da2 }
    }

    /// Creates a motionless state at the given angles.
    #[inline]
    pub const fn at_rest(a1: f64, a2: f64) -> Self {
        Self {
            a1,
            da1: 0.0,
            a2,
            da2: 0.0,
        }
    }

    /// Sets both angular velocities to zero.
    #[inline]
    pub fn stop(&mut self) {
        self.da1 = 0.0;
        self.da2 = 0.0;
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a1.is_finite() && self.da1.is_finite() && self.a2.is_finite() && self.da2.is_finite()
    }

    /// Both angles wrapped into `(-π, π]`, for plotting.
    #[inline]
    pub fn wrapped_angles(&self) -> (f64, f64) {
        (wrap_angle(self.a1), wrap_angle(self.a2))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::START
    }
}

/// Time derivative of a [`State`]: `(da1, dda1, da2, dda2)`.
///
/// Produced by [`dynamics::derive`](crate::dynamics::derive). Supports the
/// scaling and summing that RK4 needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Derivative {
    /// Rate of change of `a1`, equal to the current `da1`.
    pub da1: f64,
    /// Angular acceleration of rod 1.
    pub dda1: f64,
    /// Rate of change of `a2`, equal to the current `da2`.
    pub da2: f64,
    /// Angular acceleration of rod 2.
    pub dda2: f64,
}

impl Derivative {
    /// Creates a derivative from all four components.
    #[inline]
    pub const fn new(da1: f64, dda1: f64, da2: f64, dda2: f64) -> Self {
        Self {
            da1,
            dda1,
            da2,
            dda2,
        }
    }
}

impl Add for Derivative {
    type Output = Derivative;

    #[inline]
    fn add(self, other: Derivative) -> Derivative {
        Derivative {
            da1: self.da1 + other.da1,
            dda1: self.dda1 + other.dda1,
            da2: self.da2 + other.da2,
            dda2: self.dda2 + other.dda2,
        }
    }
}

impl Mul<f64> for Derivative {
    type Output = Derivative;

    #[inline]
    fn mul(self, scalar: f64) -> Derivative {
        Derivative {
            da1: self.da1 * scalar,
            dda1: self.dda1 * scalar,
            da2: self.da2 * scalar,
            dda2: self.dda2 * scalar,
        }
    }
}

impl Mul<Derivative> for f64 {
    type Output = Derivative;

    #[inline]
    fn mul(self, d: Derivative) -> Derivative {
        d * self
    }
}

/// Moves a state along a (pre-scaled) derivative.
impl Add<Derivative> for State {
    type Output = State;

    #[inline]
    fn add(self, d: Derivative) -> State {
        State {
            a1: self.a1 + d.da1,
            da1: self.da1 + d.dda1,
            a2: self.a2 + d.da2,
            da2: self.da2 + d.dda2,
        }
    }
}
