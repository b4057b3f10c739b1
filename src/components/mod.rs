//! Placeable component models.
//!
//! - Electrical: battery, bulb, resistor, switch, wire. Each has exactly two
//!   endpoints, `start` and `end`.
//! - Logic: AND, OR, NOT, NAND, NOR, XOR, XNOR, passthrough wire, fixed 0/1
//!   inputs and output probes. Each has an ordered list of input ports and
//!   one output port.
//!
//! Port and endpoint positions are always derived from the component's
//! center and rotation, never stored.

mod electric;
mod logic;

pub use electric::{
    ElectricComponent, ElectricKind, ElectricPart, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE,
};
pub use logic::{LogicComponent, LogicKind, LogicValue};

use std::fmt;

/// A unique identifier for a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Half the length of a component body along its local x axis.
pub const HALF_WIDTH: f64 = 40.0;
