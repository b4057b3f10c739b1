//! # Vezalko Core
//!
//! Simulation core for an educational circuit sandbox.
//!
//! Two workspaces share one spatial model:
//!
//! - electrical circuits built from batteries, bulbs, resistors, switches
//!   and wires, simulated to a closed/open verdict that lights bulbs;
//! - combinational logic networks of AND/OR/NOT/NAND/NOR/XOR/XNOR gates,
//!   fixed 0/1 inputs and output probes, evaluated to 0, 1 or undefined
//!   per component.
//!
//! Nobody draws wires explicitly. Components are placed at positions and
//! whatever endpoints or ports lie within the merge radius of each other are
//! connected.
//!
//! ## Architecture
//!
//! - [`spatial`] - Points, endpoint nodes, and the proximity-merging node graph
//! - [`components`] - Electrical and logic component models
//! - [`electric`] - Electrical workspace and closed-loop simulation
//! - [`logic`] - Logic workspace, wiring inference and value propagation
//! - [`placement`] - Grid snapping and placement rules
//! - [`persist`] - Saved layouts (`{type, x, y, rotation}` per component)
//! - [`config`] - Simulation tunables
//!
//! ## Usage
//!
//! ```
//! use vezalko_core::{ElectricCircuit, ElectricKind, SimulationResult};
//!
//! let mut circuit = ElectricCircuit::new();
//! circuit.add_component(ElectricKind::Battery, 320.0, 120.0, 0).unwrap();
//! assert_eq!(circuit.simulation_result(), SimulationResult::OpenCircuit);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! vezalko layout.ron --kind logic
//! ```
//!
//! ## Threading
//!
//! Both circuits are plain single-owner values. `simulate()` is a bounded CPU
//! loop with no suspension points; hosts that share a circuit between
//! threads must serialize access themselves.

pub mod components;
pub mod config;
pub mod electric;
pub mod error;
pub mod logic;
pub mod persist;
pub mod placement;
pub mod spatial;

// Re-export main types for convenience
pub use components::{ComponentId, ElectricKind, LogicKind, LogicValue};
pub use config::SimulationConfig;
pub use electric::{BulbArrangement, ElectricCircuit, SimulationResult};
pub use error::{Result, SandboxError};
pub use logic::{LogicCircuit, OutputValue, Propagation};
pub use persist::{SavedCircuit, SavedComponent};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{WasmElectricSim, WasmLogicSim};
