//! Logic components.

use std::fmt;
use std::str::FromStr;

use super::{ComponentId, HALF_WIDTH};
use crate::spatial::{normalize_rotation, rotate_offset, Point};

/// Vertical spacing of the two inputs on a two-input gate, from center.
const INPUT_SPREAD: f64 = 20.0;

/// Logic component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    /// Passthrough segment.
    Wire,
    /// Constant 0 source.
    Input0,
    /// Constant 1 source.
    Input1,
    /// Probe that displays its single input.
    Output,
}

impl LogicKind {
    /// All kinds, in palette order.
    pub const ALL: [LogicKind; 11] = [
        LogicKind::And,
        LogicKind::Or,
        LogicKind::Not,
        LogicKind::Nand,
        LogicKind::Nor,
        LogicKind::Xor,
        LogicKind::Xnor,
        LogicKind::Wire,
        LogicKind::Input0,
        LogicKind::Input1,
        LogicKind::Output,
    ];

    /// The type tag used in saved layouts.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicKind::And => "and",
            LogicKind::Or => "or",
            LogicKind::Not => "not",
            LogicKind::Nand => "nand",
            LogicKind::Nor => "nor",
            LogicKind::Xor => "xor",
            LogicKind::Xnor => "xnor",
            LogicKind::Wire => "wire",
            LogicKind::Input0 => "input-0",
            LogicKind::Input1 => "input-1",
            LogicKind::Output => "output",
        }
    }

    /// Two-input gates have inputs above and below the body center.
    pub fn is_two_input(&self) -> bool {
        matches!(
            self,
            LogicKind::And
                | LogicKind::Or
                | LogicKind::Nand
                | LogicKind::Nor
                | LogicKind::Xor
                | LogicKind::Xnor
        )
    }

    /// Fixed inputs hold a constant and never read their ports.
    pub fn is_fixed_input(&self) -> bool {
        matches!(self, LogicKind::Input0 | LogicKind::Input1)
    }

    /// The constant a fixed input holds, or undefined for everything else.
    pub fn initial_value(&self) -> LogicValue {
        match self {
            LogicKind::Input0 => LogicValue::Low,
            LogicKind::Input1 => LogicValue::High,
            _ => LogicValue::Undefined,
        }
    }

    /// Input port offsets from the center for a given rotation.
    pub fn input_offsets(&self, rotation: i32) -> Vec<Point> {
        if self.is_two_input() {
            vec![
                rotate_offset(Point::new(-HALF_WIDTH, -INPUT_SPREAD), rotation),
                rotate_offset(Point::new(-HALF_WIDTH, INPUT_SPREAD), rotation),
            ]
        } else {
            vec![rotate_offset(Point::new(-HALF_WIDTH, 0.0), rotation)]
        }
    }

    /// Output port offset from the center for a given rotation.
    pub fn output_offset(rotation: i32) -> Point {
        rotate_offset(Point::new(HALF_WIDTH, 0.0), rotation)
    }
}

impl fmt::Display for LogicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// A signal value: 0, 1, or no signal at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicValue {
    Low,
    High,
    #[default]
    Undefined,
}

impl LogicValue {
    /// Convert from a boolean.
    pub fn from_bool(value: bool) -> Self {
        if value {
            LogicValue::High
        } else {
            LogicValue::Low
        }
    }

    /// The boolean value, if defined.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LogicValue::Low => Some(false),
            LogicValue::High => Some(true),
            LogicValue::Undefined => None,
        }
    }

    /// Check whether a signal is present.
    pub fn is_defined(&self) -> bool {
        !matches!(self, LogicValue::Undefined)
    }
}

impl From<bool> for LogicValue {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicValue::Low => f.write_str("0"),
            LogicValue::High => f.write_str("1"),
            LogicValue::Undefined => f.write_str("?"),
        }
    }
}

/// A logic component placed in the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicComponent {
    pub id: ComponentId,
    pub kind: LogicKind,
    /// Center of the component body.
    pub position: Point,
    /// Rotation in degrees, kept in `[0, 360)`.
    pub rotation: i32,
    /// Current value, written by simulation.
    pub value: LogicValue,
}

impl LogicComponent {
    /// Create a component holding its initial value.
    pub fn new(id: ComponentId, kind: LogicKind, position: Point, rotation: i32) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: normalize_rotation(rotation),
            value: kind.initial_value(),
        }
    }

    /// World positions of the input ports, in port order.
    pub fn input_ports(&self) -> Vec<Point> {
        self.kind
            .input_offsets(self.rotation)
            .into_iter()
            .map(|offset| self.position.offset(offset))
            .collect()
    }

    /// World position of the output port.
    pub fn output_port(&self) -> Point {
        self.position.offset(LogicKind::output_offset(self.rotation))
    }

    /// Add one quarter turn.
    pub fn rotate(&mut self, step: i32) {
        self.rotation = normalize_rotation(self.rotation + step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_counts() {
        assert_eq!(LogicKind::And.input_offsets(0).len(), 2);
        assert_eq!(LogicKind::Xnor.input_offsets(0).len(), 2);
        assert_eq!(LogicKind::Not.input_offsets(0).len(), 1);
        assert_eq!(LogicKind::Wire.input_offsets(0).len(), 1);
        assert_eq!(LogicKind::Output.input_offsets(0).len(), 1);
    }

    #[test]
    fn test_ports_unrotated() {
        let gate = LogicComponent::new(ComponentId(0), LogicKind::And, Point::new(400.0, 240.0), 0);
        assert_eq!(
            gate.input_ports(),
            vec![Point::new(360.0, 220.0), Point::new(360.0, 260.0)]
        );
        assert_eq!(gate.output_port(), Point::new(440.0, 240.0));
    }

    #[test]
    fn test_ports_rotate_rigidly() {
        let center = Point::new(400.0, 240.0);
        let gate = LogicComponent::new(ComponentId(0), LogicKind::Or, center, 180);
        assert_eq!(
            gate.input_ports(),
            vec![Point::new(440.0, 260.0), Point::new(440.0, 220.0)]
        );
        assert_eq!(gate.output_port(), Point::new(360.0, 240.0));
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(LogicKind::Input0.initial_value(), LogicValue::Low);
        assert_eq!(LogicKind::Input1.initial_value(), LogicValue::High);
        assert_eq!(LogicKind::Nand.initial_value(), LogicValue::Undefined);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(LogicValue::Low.to_string(), "0");
        assert_eq!(LogicValue::High.to_string(), "1");
        assert_eq!(LogicValue::Undefined.to_string(), "?");
    }

    #[test]
    fn test_kind_tags() {
        for kind in LogicKind::ALL {
            assert_eq!(kind.as_str().parse::<LogicKind>(), Ok(kind));
        }
        assert!("battery".parse::<LogicKind>().is_err());
    }
}
