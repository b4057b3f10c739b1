//! Saved layouts.
//!
//! A layout stores only `{type, x, y, rotation}` per component. Wiring is
//! never saved: loading places each component back at its center and the
//! next simulation re-derives every connection from geometry. Layouts are
//! encoded as RON.
//!
//! ```text
//! (
//!     name: Some("first loop"),
//!     components: [
//!         (type: "battery", x: 300.0, y: 120.0, rotation: 0),
//!         (type: "switch-on", x: 300.0, y: 200.0, rotation: 0),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::components::{ElectricKind, ElectricPart, LogicKind};
use crate::config::SimulationConfig;
use crate::electric::{ElectricCircuit, SimulationResult};
use crate::error::{Result, SandboxError};
use crate::logic::{LogicCircuit, Propagation};
use crate::spatial::Point;

/// Type tag for a closed switch. An open switch saves as plain `switch`.
const SWITCH_ON: &str = "switch-on";
/// Accepted on load as an alias for an open switch.
const SWITCH_OFF: &str = "switch-off";

/// One saved component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: i32,
}

impl SavedComponent {
    /// Create a saved component.
    pub fn new(kind: impl Into<String>, x: f64, y: f64, rotation: i32) -> Self {
        Self {
            kind: kind.into(),
            x,
            y,
            rotation,
        }
    }
}

/// A saved layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedCircuit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub components: Vec<SavedComponent>,
}

impl SavedCircuit {
    /// Create an unnamed layout.
    pub fn new(components: Vec<SavedComponent>) -> Self {
        Self {
            name: None,
            components,
        }
    }

    /// Encode as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| {
            SandboxError::Encode {
                message: e.to_string(),
            }
        })
    }

    /// Decode from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| SandboxError::Decode {
            message: e.to_string(),
        })
    }

    /// Read and decode a layout file.
    #[cfg(feature = "cli")]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SandboxError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_ron(&content)
    }
}

fn parse_electric(tag: &str, index: usize) -> Result<(ElectricKind, bool)> {
    match tag {
        SWITCH_ON => Ok((ElectricKind::Switch, true)),
        SWITCH_OFF => Ok((ElectricKind::Switch, false)),
        _ => match tag.parse::<ElectricKind>() {
            Ok(kind) => Ok((kind, false)),
            Err(()) if tag.parse::<LogicKind>().is_ok() => {
                Err(SandboxError::wrong_kind(tag, index, "electric"))
            }
            Err(()) => Err(SandboxError::unknown_type(tag, index)),
        },
    }
}

fn parse_logic(tag: &str, index: usize) -> Result<LogicKind> {
    match tag.parse::<LogicKind>() {
        Ok(kind) => Ok(kind),
        Err(()) if tag.parse::<ElectricKind>().is_ok() || tag == SWITCH_ON || tag == SWITCH_OFF => {
            Err(SandboxError::wrong_kind(tag, index, "logic"))
        }
        Err(()) => Err(SandboxError::unknown_type(tag, index)),
    }
}

impl ElectricCircuit {
    /// Reduce the layout to saved components, in placement order.
    pub fn serialize(&self) -> SavedCircuit {
        let components = self
            .components()
            .iter()
            .map(|c| {
                let tag = match c.part {
                    ElectricPart::Switch { closed: true } => SWITCH_ON,
                    _ => c.kind().as_str(),
                };
                SavedComponent::new(tag, c.position.x, c.position.y, c.rotation)
            })
            .collect();
        SavedCircuit::new(components)
    }

    /// Replace all components with a saved layout and simulate.
    ///
    /// Every type tag is validated before anything is replaced, so a bad
    /// layout leaves the circuit untouched.
    pub fn load(&mut self, saved: &SavedCircuit) -> Result<SimulationResult> {
        let parsed = saved
            .components
            .iter()
            .enumerate()
            .map(|(index, c)| parse_electric(&c.kind, index))
            .collect::<Result<Vec<_>>>()?;

        self.clear();
        for ((kind, closed), saved) in parsed.into_iter().zip(&saved.components) {
            let id = self.place(kind, Point::new(saved.x, saved.y), saved.rotation);
            if closed {
                let update = crate::placement::ComponentUpdate::new().with_closed(true);
                self.update_component(id, update)?;
            }
        }

        Ok(self.simulate())
    }

    /// Build a circuit from a saved layout.
    pub fn from_saved(saved: &SavedCircuit, config: SimulationConfig) -> Result<Self> {
        let mut circuit = Self::with_config(config);
        circuit.load(saved)?;
        Ok(circuit)
    }
}

impl LogicCircuit {
    /// Reduce the layout to saved components, in placement order.
    pub fn serialize(&self) -> SavedCircuit {
        let components = self
            .components()
            .iter()
            .map(|c| SavedComponent::new(c.kind.as_str(), c.position.x, c.position.y, c.rotation))
            .collect();
        SavedCircuit::new(components)
    }

    /// Replace all components with a saved layout and simulate.
    pub fn load(&mut self, saved: &SavedCircuit) -> Result<Propagation> {
        let kinds = saved
            .components
            .iter()
            .enumerate()
            .map(|(index, c)| parse_logic(&c.kind, index))
            .collect::<Result<Vec<_>>>()?;

        self.clear();
        for (kind, saved) in kinds.into_iter().zip(&saved.components) {
            self.place(kind, Point::new(saved.x, saved.y), saved.rotation);
        }

        Ok(self.simulate())
    }

    /// Build a circuit from a saved layout.
    pub fn from_saved(saved: &SavedCircuit, config: SimulationConfig) -> Result<Self> {
        let mut circuit = Self::with_config(config);
        circuit.load(saved)?;
        Ok(circuit)
    }
}
