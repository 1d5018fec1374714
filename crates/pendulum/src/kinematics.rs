//! Cartesian positions of the bobs.

use core::ops::{Add, Sub};

use crate::math::{cos, sin, sqrt};
use crate::params::Parameters;
use crate::state::State;

/// A point in the pendulum plane, in world units.
///
/// The pivot is the origin and `y` increases upward, so a hanging bob has a
/// negative `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the pivot (0, 0).
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Scales both coordinates, e.g. from world units to screen units.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        sqrt(dx * dx + dy * dy)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Positions of both bobs for one state.
///
/// ```text
/// x1 = l1·sin a1        y1 = −l1·cos a1
/// x2 = x1 + l2·sin a2   y2 = y1 − l2·cos a2
/// ```
///
/// # Example
///
/// ```rust
/// use pendulum::{BobPositions, Parameters, State};
///
/// let params = Parameters::default();
/// let bobs = BobPositions::of(&State::at_rest(0.0, 0.0), &params);
///
/// // Hanging straight down
/// assert_eq!(bobs.first.y, -1.5);
/// assert_eq!(bobs.second.y, -3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BobPositions {
    /// End of rod 1.
    pub first: Point,
    /// End of rod 2.
    pub second: Point,
}

impl BobPositions {
    /// Computes the bob positions for `state`.
    pub fn of(state: &State, params: &Parameters) -> Self {
        let first = Point::new(params.l1 * sin(state.a1), -params.l1 * cos(state.a1));
        let second = first + Point::new(params.l2 * sin(state.a2), -params.l2 * cos(state.a2));
        Self { first, second }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_start_configuration_is_horizontal() {
        let bobs = BobPositions::of(&State::at_rest(FRAC_PI_2, FRAC_PI_2), &Parameters::default());
        assert!(approx_eq(bobs.first.x, 1.5));
        assert!(approx_eq(bobs.first.y, 0.0));
        assert!(approx_eq(bobs.second.x, 3.0));
        assert!(approx_eq(bobs.second.y, 0.0));
    }

    #[test]
    fn test_rod_lengths_preserved() {
        let p = Parameters::new(1.0, 1.0, 2.0, 0.5, 9.8);
        let bobs = BobPositions::of(&State::at_rest(0.8, -2.1), &p);
        assert!(approx_eq(bobs.first.distance(Point::origin()), p.l1));
        assert!(approx_eq(bobs.second.distance(bobs.first), p.l2));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(0.5, -1.0);
        assert_eq!(a + b, Point::new(1.5, 1.0));
        assert_eq!(a - b, Point::new(0.5, 3.0));
        assert_eq!(a.scaled(0.3), Point::new(1.0 * 0.3, 2.0 * 0.3));
    }
}
