//! Angle helpers for display and drag input.

use core::f64::consts::{PI, TAU};

use crate::math::atan2;

/// Wraps an angle into `(-π, π]`.
///
/// Values already in range are returned unchanged, so wrapping is
/// idempotent. Non-finite input is returned as-is.
///
/// This is for plotting only. Integration keeps raw, unwrapped angles.
///
/// # Example
///
/// ```rust
/// use core::f64::consts::PI;
/// use pendulum::wrap_angle;
///
/// assert_eq!(wrap_angle(PI), PI);
/// assert_eq!(wrap_angle(-PI), PI);
/// assert!((wrap_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() || (angle > -PI && angle <= PI) {
        return angle;
    }

    // `%` is exact for floats, so this stays accurate for huge inputs
    let mut wrapped = angle % TAU;
    loop {
        if wrapped <= -PI {
            wrapped += TAU;
        } else if wrapped > PI {
            wrapped -= TAU;
        } else {
            return wrapped;
        }
    }
}

/// Angle of a pointer position relative to the pivot, measured from the
/// downward vertical: `atan2(x, -y)`.
///
/// `y` points up, so a pointer straight below the pivot gives `0` and one to
/// the right gives `π/2`.
#[inline]
pub fn pointer_angle(x: f64, y: f64) -> f64 {
    atan2(x, -y)
}
