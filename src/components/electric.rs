//! Electrical components.

use std::fmt;
use std::str::FromStr;

use super::{ComponentId, HALF_WIDTH};
use crate::spatial::{normalize_rotation, rotate_offset, Point};

/// Battery voltage shown to the user.
pub const DEFAULT_VOLTAGE: f64 = 3.3;

/// Resistance of a freshly placed resistor, in ohms.
pub const DEFAULT_RESISTANCE: f64 = 100.0;

/// The five electrical component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectricKind {
    Battery,
    Bulb,
    Resistor,
    Switch,
    Wire,
}

impl ElectricKind {
    /// All kinds, in palette order.
    pub const ALL: [ElectricKind; 5] = [
        ElectricKind::Battery,
        ElectricKind::Bulb,
        ElectricKind::Resistor,
        ElectricKind::Switch,
        ElectricKind::Wire,
    ];

    /// The type tag used in saved layouts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectricKind::Battery => "battery",
            ElectricKind::Bulb => "bulb",
            ElectricKind::Resistor => "resistor",
            ElectricKind::Switch => "switch",
            ElectricKind::Wire => "wire",
        }
    }
}

impl fmt::Display for ElectricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectricKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElectricKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// A component type together with its type-specific state.
#[derive(Debug, Clone, PartialEq)]
pub enum ElectricPart {
    Battery { voltage: f64 },
    /// `lit` is output state, written by simulation.
    Bulb { lit: bool },
    Resistor { resistance: f64 },
    /// `closed` is input state, written by the user.
    Switch { closed: bool },
    Wire,
}

impl ElectricPart {
    /// Fresh state for a newly placed component: switches open, bulbs dark.
    pub fn new(kind: ElectricKind) -> Self {
        match kind {
            ElectricKind::Battery => ElectricPart::Battery {
                voltage: DEFAULT_VOLTAGE,
            },
            ElectricKind::Bulb => ElectricPart::Bulb { lit: false },
            ElectricKind::Resistor => ElectricPart::Resistor {
                resistance: DEFAULT_RESISTANCE,
            },
            ElectricKind::Switch => ElectricPart::Switch { closed: false },
            ElectricKind::Wire => ElectricPart::Wire,
        }
    }

    /// The bare component type.
    pub fn kind(&self) -> ElectricKind {
        match self {
            ElectricPart::Battery { .. } => ElectricKind::Battery,
            ElectricPart::Bulb { .. } => ElectricKind::Bulb,
            ElectricPart::Resistor { .. } => ElectricKind::Resistor,
            ElectricPart::Switch { .. } => ElectricKind::Switch,
            ElectricPart::Wire => ElectricKind::Wire,
        }
    }

    /// Whether current can pass through in the present state.
    pub fn conducts(&self) -> bool {
        match self {
            ElectricPart::Switch { closed } => *closed,
            _ => true,
        }
    }
}

/// An electrical component placed in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricComponent {
    pub id: ComponentId,
    pub part: ElectricPart,
    /// Center of the component body.
    pub position: Point,
    /// Rotation in degrees, kept in `[0, 360)`.
    pub rotation: i32,
}

impl ElectricComponent {
    /// Create a component in its fresh state.
    pub fn new(id: ComponentId, kind: ElectricKind, position: Point, rotation: i32) -> Self {
        Self {
            id,
            part: ElectricPart::new(kind),
            position,
            rotation: normalize_rotation(rotation),
        }
    }

    /// The component type.
    pub fn kind(&self) -> ElectricKind {
        self.part.kind()
    }

    /// Position of the `start` endpoint.
    pub fn start(&self) -> Point {
        self.position
            .offset(rotate_offset(Point::new(-HALF_WIDTH, 0.0), self.rotation))
    }

    /// Position of the `end` endpoint.
    pub fn end(&self) -> Point {
        self.position
            .offset(rotate_offset(Point::new(HALF_WIDTH, 0.0), self.rotation))
    }

    /// Whether current can pass through.
    pub fn conducts(&self) -> bool {
        self.part.conducts()
    }

    /// Bulb state. Always false for anything that is not a bulb.
    pub fn is_lit(&self) -> bool {
        matches!(self.part, ElectricPart::Bulb { lit: true })
    }

    /// Switch state. Always false for anything that is not a switch.
    pub fn is_closed(&self) -> bool {
        matches!(self.part, ElectricPart::Switch { closed: true })
    }

    /// Set the lit flag on a bulb. No effect on other components.
    pub fn set_lit(&mut self, value: bool) {
        if let ElectricPart::Bulb { lit } = &mut self.part {
            *lit = value;
        }
    }

    /// Set a switch's state. Returns false if this is not a switch.
    pub fn set_closed(&mut self, value: bool) -> bool {
        match &mut self.part {
            ElectricPart::Switch { closed } => {
                *closed = value;
                true
            }
            _ => false,
        }
    }

    /// Toggle a switch. Returns false if this is not a switch.
    pub fn toggle(&mut self) -> bool {
        let closed = self.is_closed();
        self.set_closed(!closed)
    }

    /// Add one quarter turn.
    pub fn rotate(&mut self, step: i32) {
        self.rotation = normalize_rotation(self.rotation + step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(kind: ElectricKind, rotation: i32) -> ElectricComponent {
        ElectricComponent::new(ComponentId(0), kind, Point::new(300.0, 120.0), rotation)
    }

    #[test]
    fn test_endpoints_follow_rotation() {
        let wire = place(ElectricKind::Wire, 0);
        assert_eq!(wire.start(), Point::new(260.0, 120.0));
        assert_eq!(wire.end(), Point::new(340.0, 120.0));

        let wire = place(ElectricKind::Wire, 90);
        assert_eq!(wire.start(), Point::new(300.0, 80.0));
        assert_eq!(wire.end(), Point::new(300.0, 160.0));
    }

    #[test]
    fn test_conduction_rules() {
        for kind in [
            ElectricKind::Battery,
            ElectricKind::Bulb,
            ElectricKind::Resistor,
            ElectricKind::Wire,
        ] {
            assert!(place(kind, 0).conducts(), "{kind} should conduct");
        }

        let mut switch = place(ElectricKind::Switch, 0);
        assert!(!switch.conducts());
        assert!(switch.toggle());
        assert!(switch.conducts());
    }

    #[test]
    fn test_toggle_rejects_non_switch() {
        let mut bulb = place(ElectricKind::Bulb, 0);
        assert!(!bulb.toggle());
        assert!(!bulb.is_lit());
    }

    #[test]
    fn test_set_lit_only_touches_bulbs() {
        let mut wire = place(ElectricKind::Wire, 0);
        wire.set_lit(true);
        assert_eq!(wire.part, ElectricPart::Wire);

        let mut bulb = place(ElectricKind::Bulb, 0);
        bulb.set_lit(true);
        assert!(bulb.is_lit());
    }

    #[test]
    fn test_kind_tags() {
        for kind in ElectricKind::ALL {
            assert_eq!(kind.as_str().parse::<ElectricKind>(), Ok(kind));
        }
        assert!("and".parse::<ElectricKind>().is_err());
    }

    #[test]
    fn test_rotate_wraps() {
        let mut wire = place(ElectricKind::Wire, 270);
        wire.rotate(90);
        assert_eq!(wire.rotation, 0);
    }
}
