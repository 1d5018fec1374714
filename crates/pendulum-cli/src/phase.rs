//! Phase-portrait coordinates: each rod's wrapped angle against its angular
//! velocity, normalized to the unit square.

use std::f64::consts::{PI, TAU};

use pendulum::{State, wrap_angle};
use serde::Serialize;

/// Angular velocity shown at the top edge of the portrait. The bottom edge is
/// its negative.
pub const VELOCITY_LIMIT: f64 = 10.0;

/// One point of the portrait.
///
/// `u = (wrap(a) + π) / 2π` runs left to right across `(0, 1]`.
/// `v = (da + 10) / 20` runs bottom to top; velocities beyond ±10 rad/s
/// fall outside `[0, 1]` and are off the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasePoint {
    /// Horizontal coordinate from the wrapped angle.
    pub u: f64,
    /// Vertical coordinate from the angular velocity.
    pub v: f64,
}

impl PhasePoint {
    /// Maps an angle and its angular velocity.
    pub fn new(angle: f64, velocity: f64) -> Self {
        Self {
            u: (wrap_angle(angle) + PI) / TAU,
            v: (velocity + VELOCITY_LIMIT) / (2.0 * VELOCITY_LIMIT),
        }
    }

    /// Whether the point lies on the plot.
    pub fn is_visible(&self) -> bool {
        (0.0..=1.0).contains(&self.u) && (0.0..=1.0).contains(&self.v)
    }

    /// Pixel position on a `width` × `height` canvas whose origin is the top
    /// left corner.
    pub fn to_canvas(self, width: f64, height: f64) -> (f64, f64) {
        (self.u * width, height - self.v * height)
    }
}

/// Portrait points for both rods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasePortrait {
    /// Rod 1: `(a1, da1)`.
    pub first: PhasePoint,
    /// Rod 2: `(a2, da2)`.
    pub second: PhasePoint,
}

impl PhasePortrait {
    /// Maps both rods of `state`.
    pub fn of(state: &State) -> Self {
        Self {
            first: PhasePoint::new(state.a1, state.da1),
            second: PhasePoint::new(state.a2, state.da2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn hanging_at_rest_is_the_center() {
        let p = PhasePoint::new(0.0, 0.0);
        assert!(approx_eq(p.u, 0.5));
        assert!(approx_eq(p.v, 0.5));
        assert!(p.is_visible());
    }

    #[test]
    fn angle_is_wrapped_first() {
        let a = PhasePoint::new(0.5, 0.0);
        let b = PhasePoint::new(0.5 + 4.0 * PI, 0.0);
        assert!(approx_eq(a.u, b.u));
    }

    #[test]
    fn inverted_maps_to_right_edge() {
        assert!(approx_eq(PhasePoint::new(PI, 0.0).u, 1.0));
        assert!(approx_eq(PhasePoint::new(-PI, 0.0).u, 1.0));
    }

    #[test]
    fn velocity_limits_map_to_edges() {
        assert!(approx_eq(PhasePoint::new(0.0, VELOCITY_LIMIT).v, 1.0));
        assert!(approx_eq(PhasePoint::new(0.0, -VELOCITY_LIMIT).v, 0.0));
        assert!(!PhasePoint::new(0.0, 12.0).is_visible());
    }

    #[test]
    fn canvas_flips_vertical_axis() {
        let (x, y) = PhasePoint::new(0.0, VELOCITY_LIMIT).to_canvas(200.0, 100.0);
        assert!(approx_eq(x, 100.0));
        assert!(approx_eq(y, 0.0));
    }

    #[test]
    fn portrait_maps_both_rods() {
        let portrait = PhasePortrait::of(&State::new(0.0, -10.0, PI, 10.0));
        assert!(approx_eq(portrait.first.v, 0.0));
        assert!(approx_eq(portrait.second.u, 1.0));
        assert!(approx_eq(portrait.second.v, 1.0));
    }
}
