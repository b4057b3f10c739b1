//! Junction merge policies.

use super::Point;
use crate::config::DEFAULT_MERGE_RADIUS;

/// Decides whether two endpoints are the same junction.
///
/// The node graph consults this for every registration, so swapping the
/// policy (for example to identity-based merging) changes which components
/// are connected without touching the circuit models.
pub trait MergePolicy {
    /// True when an endpoint at `b` joins the junction at `a`.
    fn merges(&self, a: Point, b: Point) -> bool;
}

/// Merge endpoints strictly closer than `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityMerge {
    radius: f64,
}

impl ProximityMerge {
    /// Create a policy with the given radius.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// The merge radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for ProximityMerge {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_RADIUS)
    }
}

impl MergePolicy for ProximityMerge {
    fn merges(&self, a: Point, b: Point) -> bool {
        a.distance(b) < self.radius
    }
}
