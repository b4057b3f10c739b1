//! Core spatial types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in workspace coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Translate by an offset.
    pub fn offset(&self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rotate a local offset by `degrees` and round to whole units.
///
/// Rounding keeps quarter-turn rotations exact, so a port rotated by 90
/// degrees lands on the same integer coordinate as a neighbour's port.
pub fn rotate_offset(local: Point, degrees: i32) -> Point {
    let angle = (degrees as f64).to_radians();
    let (sin, cos) = angle.sin_cos();
    // `+ 0.0` folds a rounded -0.0 into 0.0
    Point::new(
        (local.x * cos - local.y * sin).round() + 0.0,
        (local.x * sin + local.y * cos).round() + 0.0,
    )
}

/// Normalize a rotation in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// A unique identifier for a node in a [`NodeGraph`](super::NodeGraph).
///
/// Only a graph hands these out, so an id is valid for the graph that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A connection endpoint.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    /// Directly linked nodes. Linking is always symmetric.
    pub links: BTreeSet<NodeId>,
}

impl Node {
    /// Create an unlinked node.
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            links: BTreeSet::new(),
        }
    }

    /// Check whether `other` is one hop away.
    pub fn is_linked_to(&self, other: NodeId) -> bool {
        self.links.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_quarter_turns() {
        let p = Point::new(40.0, 0.0);
        assert_eq!(rotate_offset(p, 0), Point::new(40.0, 0.0));
        assert_eq!(rotate_offset(p, 90), Point::new(0.0, 40.0));
        assert_eq!(rotate_offset(p, 180), Point::new(-40.0, 0.0));
        assert_eq!(rotate_offset(p, 270), Point::new(0.0, -40.0));
    }

    #[test]
    fn test_rotate_gate_input() {
        let p = rotate_offset(Point::new(-40.0, -20.0), 90);
        assert_eq!(p, Point::new(20.0, -40.0));
    }

    #[test]
    fn test_rotate_rounds_diagonals() {
        let p = rotate_offset(Point::new(40.0, 0.0), 45);
        assert_eq!(p, Point::new(28.0, 28.0));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(360), 0);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(-90), 270);
    }
}
