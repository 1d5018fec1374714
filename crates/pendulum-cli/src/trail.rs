//! Bounded history of the second bob's path.

use std::collections::VecDeque;

use pendulum::Point;

/// Longest trail kept, in points.
pub const MAX_TRAIL: usize = 500;

/// The most recent positions of the second bob, oldest first.
///
/// The host pushes one point per frame while the simulation is running and
/// clears the trail on reset. A capacity of zero disables the trail.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Trail {
    /// Creates an empty trail holding at most `capacity` points (capped at
    /// [`MAX_TRAIL`]).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_TRAIL);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Whether points are being kept at all.
    pub const fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Appends a point, dropping the oldest one when full.
    pub fn push(&mut self, point: Point) {
        if !self.is_enabled() {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Forgets every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Number of points held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points are held.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest point, if any.
    pub fn latest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
