//! Workspace placement rules: grid snapping, the reserved palette zone and
//! occupancy checks.

use crate::error::{Result, SandboxError};
use crate::spatial::Point;

/// Grid cell size in workspace units.
pub const DEFAULT_GRID_SIZE: f64 = 60.0;

/// Width of the component palette along the left edge.
pub const DEFAULT_PANEL_WIDTH: f64 = 200.0;

/// Extra clearance to the right of the palette.
pub const DEFAULT_PANEL_MARGIN: f64 = 20.0;

/// Degrees added by one rotate action.
pub const ROTATION_STEP: i32 = 90;

/// Placement grid. The grid origin on the x axis is the panel's right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub size: f64,
    pub panel_width: f64,
    pub panel_margin: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            panel_width: DEFAULT_PANEL_WIDTH,
            panel_margin: DEFAULT_PANEL_MARGIN,
        }
    }
}

impl Grid {
    /// Snap a raw pointer position to the nearest grid intersection.
    pub fn snap(&self, x: f64, y: f64) -> Point {
        Point::new(
            round_half_up((x - self.panel_width) / self.size) * self.size + self.panel_width,
            round_half_up(y / self.size) * self.size,
        )
    }

    /// Check whether a point lies in the reserved palette zone.
    pub fn in_panel(&self, point: Point) -> bool {
        point.x < self.panel_width + self.panel_margin
    }

    /// Check whether two component centers share a grid cell.
    pub fn collides(&self, a: Point, b: Point) -> bool {
        let half = self.size / 2.0;
        (a.x - b.x).abs() < half && (a.y - b.y).abs() < half
    }

    /// Snap a requested position and validate it against `occupied`.
    pub fn admit(
        &self,
        x: f64,
        y: f64,
        mut occupied: impl Iterator<Item = Point>,
    ) -> Result<Point> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SandboxError::InvalidPosition { x, y });
        }

        let snapped = self.snap(x, y);

        if occupied.any(|other| self.collides(other, snapped)) {
            return Err(SandboxError::PositionOccupied {
                x: snapped.x,
                y: snapped.y,
            });
        }

        if self.in_panel(snapped) {
            return Err(SandboxError::PositionInPanel {
                x: snapped.x,
                y: snapped.y,
            });
        }

        Ok(snapped)
    }
}

/// Round with halves toward positive infinity, as front ends expect.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Partial update of a placed component's fields.
///
/// Unset fields are left alone. Updates never trigger a simulation; callers
/// simulate once a drag or edit is committed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<i32>,
    /// Switch state. Ignored for components that are not switches.
    pub closed: Option<bool>,
}

impl ComponentUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new center.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Set a switch's state.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    /// Apply the positional fields to a center point.
    pub fn apply_position(&self, position: Point) -> Point {
        Point::new(self.x.unwrap_or(position.x), self.y.unwrap_or(position.y))
    }
}
