//! WASM bindings for Vezalko Core.
//!
//! Thin adapters for browser front ends. The rendering layer owns one
//! simulator per workspace and calls into it after every committed edit.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmElectricSim } from 'vezalko_core';
//!
//! await init();
//!
//! const sim = new WasmElectricSim();
//! const battery = sim.add_component("battery", 320, 120, 0);
//! console.log(sim.result_code()); // 0: open circuit
//! ```

use wasm_bindgen::prelude::*;

use crate::components::{ComponentId, ElectricKind, LogicKind, LogicValue};
use crate::config::SimulationConfig;
use crate::electric::ElectricCircuit;
use crate::error::SandboxError;
use crate::logic::LogicCircuit;
use crate::persist::SavedCircuit;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: SandboxError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn unknown(tag: &str) -> JsValue {
    to_js(SandboxError::WasmError {
        message: format!("unknown component type '{tag}'"),
    })
}

/// WASM-compatible electrical workspace.
#[wasm_bindgen]
pub struct WasmElectricSim {
    circuit: ElectricCircuit,
}

#[wasm_bindgen]
impl WasmElectricSim {
    /// Create an empty workspace.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmElectricSim {
        WasmElectricSim {
            circuit: ElectricCircuit::new(),
        }
    }

    /// Create a workspace from a saved RON layout.
    #[wasm_bindgen]
    pub fn from_ron(layout: &str, merge_radius: f64) -> Result<WasmElectricSim, JsValue> {
        let saved = SavedCircuit::from_ron(layout).map_err(to_js)?;
        let config = SimulationConfig::new().with_merge_radius(merge_radius);
        let circuit = ElectricCircuit::from_saved(&saved, config).map_err(to_js)?;
        Ok(WasmElectricSim { circuit })
    }

    /// Place a component. Returns its id, or throws if placement is rejected.
    #[wasm_bindgen]
    pub fn add_component(
        &mut self,
        kind: &str,
        x: f64,
        y: f64,
        rotation: i32,
    ) -> Result<u32, JsValue> {
        let kind: ElectricKind = kind.parse().map_err(|()| unknown(kind))?;
        self.circuit
            .add_component(kind, x, y, rotation)
            .map(|id| id.0 as u32)
            .map_err(to_js)
    }

    /// Remove a component.
    #[wasm_bindgen]
    pub fn remove_component(&mut self, id: u32) -> Result<(), JsValue> {
        self.circuit.remove_component(ComponentId(id as usize)).map_err(to_js)
    }

    /// Rotate a component by a quarter turn.
    #[wasm_bindgen]
    pub fn rotate_component(&mut self, id: u32) -> Result<(), JsValue> {
        self.circuit.rotate_component(ComponentId(id as usize)).map_err(to_js)
    }

    /// Flip a switch. Returns the new state.
    #[wasm_bindgen]
    pub fn toggle_switch(&mut self, id: u32) -> Result<bool, JsValue> {
        self.circuit.toggle_switch(ComponentId(id as usize)).map_err(to_js)
    }

    /// Re-run the simulation and return the result code.
    #[wasm_bindgen]
    pub fn simulate(&mut self) -> i32 {
        self.circuit.simulate().code()
    }

    /// Result code of the last run: -1 no battery, -2 switch off, 0 open, 1 closed.
    #[wasm_bindgen]
    pub fn result_code(&self) -> i32 {
        self.circuit.simulation_result().code()
    }

    /// Ids of lit bulbs.
    #[wasm_bindgen]
    pub fn lit_bulbs(&self) -> Vec<u32> {
        self.circuit.lit_bulbs().into_iter().map(|id| id.0 as u32).collect()
    }

    /// Encode the layout as RON.
    #[wasm_bindgen]
    pub fn to_ron(&self) -> Result<String, JsValue> {
        self.circuit.serialize().to_ron().map_err(to_js)
    }
}

impl Default for WasmElectricSim {
    fn default() -> Self {
        Self::new()
    }
}

/// WASM-compatible logic workspace.
#[wasm_bindgen]
pub struct WasmLogicSim {
    circuit: LogicCircuit,
}

#[wasm_bindgen]
impl WasmLogicSim {
    /// Create an empty workspace.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLogicSim {
        WasmLogicSim {
            circuit: LogicCircuit::new(),
        }
    }

    /// Create a workspace from a saved RON layout.
    #[wasm_bindgen]
    pub fn from_ron(layout: &str, merge_radius: f64) -> Result<WasmLogicSim, JsValue> {
        let saved = SavedCircuit::from_ron(layout).map_err(to_js)?;
        let config = SimulationConfig::new().with_merge_radius(merge_radius);
        let circuit = LogicCircuit::from_saved(&saved, config).map_err(to_js)?;
        Ok(WasmLogicSim { circuit })
    }

    /// Place a component. Returns its id, or throws if placement is rejected.
    #[wasm_bindgen]
    pub fn add_component(
        &mut self,
        kind: &str,
        x: f64,
        y: f64,
        rotation: i32,
    ) -> Result<u32, JsValue> {
        let kind: LogicKind = kind.parse().map_err(|()| unknown(kind))?;
        self.circuit
            .add_component(kind, x, y, rotation)
            .map(|id| id.0 as u32)
            .map_err(to_js)
    }

    /// Remove a component.
    #[wasm_bindgen]
    pub fn remove_component(&mut self, id: u32) -> Result<(), JsValue> {
        self.circuit.remove_component(ComponentId(id as usize)).map_err(to_js)
    }

    /// Rotate a component by a quarter turn.
    #[wasm_bindgen]
    pub fn rotate_component(&mut self, id: u32) -> Result<(), JsValue> {
        self.circuit.rotate_component(ComponentId(id as usize)).map_err(to_js)
    }

    /// Re-run propagation. Returns false if the network did not settle.
    #[wasm_bindgen]
    pub fn simulate(&mut self) -> bool {
        self.circuit.simulate().converged
    }

    /// Output probe values in placement order: 0, 1, or -1 for undefined.
    #[wasm_bindgen]
    pub fn output_values(&self) -> Vec<i32> {
        self.circuit
            .get_outputs()
            .into_iter()
            .map(|o| match o.value {
                LogicValue::Low => 0,
                LogicValue::High => 1,
                LogicValue::Undefined => -1,
            })
            .collect()
    }

    /// Check whether every output probe shows `expected` (0 or 1).
    #[wasm_bindgen]
    pub fn all_outputs_equal(&self, expected: u8) -> bool {
        self.circuit
            .all_outputs_equal(LogicValue::from_bool(expected != 0))
    }

    /// Encode the layout as RON.
    #[wasm_bindgen]
    pub fn to_ron(&self) -> Result<String, JsValue> {
        self.circuit.serialize().to_ron().map_err(to_js)
    }
}

impl Default for WasmLogicSim {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
