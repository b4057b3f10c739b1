//! Electrical circuit model.
//!
//! [`ElectricCircuit`] owns the placed components and is the simulation
//! context the front end holds. [`ElectricCircuit::simulate`] rebuilds the
//! junction graph from component geometry on every call and searches for a
//! conductive path between the terminals of the first battery:
//!
//! 1. No battery at all gives [`SimulationResult::NoBattery`].
//! 2. A path of conducting components (wires, bulbs, resistors, batteries,
//!    closed switches) from `start` to `end` gives
//!    [`SimulationResult::ClosedCircuit`] and lights every bulb.
//! 3. Otherwise every bulb goes dark, and the result is
//!    [`SimulationResult::SwitchOff`] if any switch is open, or
//!    [`SimulationResult::OpenCircuit`] if none is.
//!
//! `simulate` writes bulb state and is therefore `&mut self`.

mod search;
mod topology;

use std::fmt;
use std::ops::ControlFlow;

use crate::components::{ComponentId, ElectricComponent, ElectricKind};
use crate::config::SimulationConfig;
use crate::error::{Result, SandboxError};
use crate::placement::{ComponentUpdate, Grid, ROTATION_STEP};
use crate::spatial::Point;

use search::{LoopSearch, SearchEnd};
use topology::Topology;

/// Outcome of one electrical simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationResult {
    NoBattery,
    SwitchOff,
    OpenCircuit,
    ClosedCircuit,
}

impl SimulationResult {
    /// Stable integer code used by front-end adapters.
    pub fn code(&self) -> i32 {
        match self {
            SimulationResult::NoBattery => -1,
            SimulationResult::SwitchOff => -2,
            SimulationResult::OpenCircuit => 0,
            SimulationResult::ClosedCircuit => 1,
        }
    }

    /// Check whether current flows.
    pub fn is_closed(&self) -> bool {
        matches!(self, SimulationResult::ClosedCircuit)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SimulationResult::NoBattery => "no battery",
            SimulationResult::SwitchOff => "switch off",
            SimulationResult::OpenCircuit => "open circuit",
            SimulationResult::ClosedCircuit => "closed circuit",
        };
        f.write_str(text)
    }
}

/// How the bulbs sit relative to the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulbArrangement {
    /// Some path through the battery passes two or more bulbs.
    Series,
    /// Several paths each carry their own bulb.
    Parallel,
    /// Fewer than two bulbs, no battery, no path, or a mixed layout.
    Unknown,
}

impl fmt::Display for BulbArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BulbArrangement::Series => "series",
            BulbArrangement::Parallel => "parallel",
            BulbArrangement::Unknown => "unknown",
        };
        f.write_str(text)
    }
}

/// A workspace of electrical components.
#[derive(Debug, Clone)]
pub struct ElectricCircuit {
    components: Vec<ElectricComponent>,
    config: SimulationConfig,
    grid: Grid,
    next_id: usize,
    result: SimulationResult,
}

impl Default for ElectricCircuit {
    fn default() -> Self {
        Self::new()
    }
}

impl ElectricCircuit {
    /// Create an empty circuit with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Create an empty circuit with custom configuration.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            components: Vec::new(),
            config,
            grid: Grid::default(),
            next_id: 0,
            result: SimulationResult::NoBattery,
        }
    }

    /// Replace the placement grid.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// All placed components, in placement order.
    pub fn components(&self) -> &[ElectricComponent] {
        &self.components
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Option<&ElectricComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// The result of the last simulation run.
    pub fn simulation_result(&self) -> SimulationResult {
        self.result
    }

    /// Place a component at a snapped grid position and simulate.
    ///
    /// Rejected if the snapped position is inside the palette zone or shares
    /// a grid cell with another component.
    pub fn add_component(
        &mut self,
        kind: ElectricKind,
        x: f64,
        y: f64,
        rotation: i32,
    ) -> Result<ComponentId> {
        let position = self
            .grid
            .admit(x, y, self.components.iter().map(|c| c.position))?;
        let id = self.place(kind, position, rotation);
        self.simulate();
        Ok(id)
    }

    /// Place a component exactly at `position`, skipping placement rules.
    ///
    /// Does not simulate. Used when restoring saved layouts.
    pub fn place(&mut self, kind: ElectricKind, position: Point, rotation: i32) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.components
            .push(ElectricComponent::new(id, kind, position, rotation));
        id
    }

    /// Remove a component and simulate.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.components.remove(idx);
        self.simulate();
        Ok(())
    }

    /// Apply a partial update without simulating.
    pub fn update_component(&mut self, id: ComponentId, update: ComponentUpdate) -> Result<()> {
        let idx = self.index_of(id)?;
        let component = &mut self.components[idx];
        component.position = update.apply_position(component.position);
        if let Some(rotation) = update.rotation {
            component.rotation = crate::spatial::normalize_rotation(rotation);
        }
        if let Some(closed) = update.closed {
            component.set_closed(closed);
        }
        Ok(())
    }

    /// Rotate a component by one quarter turn and simulate.
    pub fn rotate_component(&mut self, id: ComponentId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.components[idx].rotate(ROTATION_STEP);
        self.simulate();
        Ok(())
    }

    /// Flip a switch and simulate. Returns the new switch state.
    pub fn toggle_switch(&mut self, id: ComponentId) -> Result<bool> {
        let idx = self.index_of(id)?;
        let component = &mut self.components[idx];
        if !component.toggle() {
            return Err(SandboxError::NotASwitch { id: id.to_string() });
        }
        let closed = component.is_closed();
        self.simulate();
        Ok(closed)
    }

    /// Remove every component.
    pub fn clear(&mut self) {
        self.components.clear();
        self.result = SimulationResult::NoBattery;
    }

    /// Rebuild the junction graph and classify the circuit.
    ///
    /// Every bulb's lit flag is rewritten as part of the run.
    pub fn simulate(&mut self) -> SimulationResult {
        let result = match self.battery_index() {
            None => SimulationResult::NoBattery,
            Some(battery) => {
                let topology = Topology::build(&self.components, self.config.merge_radius);
                let search =
                    LoopSearch::new(&self.components, &topology, self.config.max_search_steps);
                if search.has_closed_loop(battery) {
                    SimulationResult::ClosedCircuit
                } else if self
                    .components
                    .iter()
                    .any(|c| c.kind() == ElectricKind::Switch && !c.is_closed())
                {
                    SimulationResult::SwitchOff
                } else {
                    SimulationResult::OpenCircuit
                }
            }
        };

        let lit = result.is_closed();
        for component in &mut self.components {
            component.set_lit(lit);
        }

        log::debug!("electric simulation: {result}");
        self.result = result;
        result
    }

    /// Ids of bulbs that are currently lit.
    pub fn lit_bulbs(&self) -> Vec<ComponentId> {
        self.components
            .iter()
            .filter(|c| c.is_lit())
            .map(|c| c.id)
            .collect()
    }

    /// Classify how the bulbs are wired to the battery.
    pub fn classify_bulbs(&self) -> BulbArrangement {
        let Some(battery) = self.battery_index() else {
            return BulbArrangement::Unknown;
        };
        let bulbs = self
            .components
            .iter()
            .filter(|c| c.kind() == ElectricKind::Bulb)
            .count();
        if bulbs < 2 {
            return BulbArrangement::Unknown;
        }

        let topology = Topology::build(&self.components, self.config.merge_radius);
        let search =
            LoopSearch::new(&self.components, &topology, self.config.max_search_steps);
        let mut bulb_counts = Vec::new();
        let end = search.for_each_path(battery, |path| {
            let count = path
                .iter()
                .filter(|&&idx| self.components[idx].kind() == ElectricKind::Bulb)
                .count();
            bulb_counts.push(count);
            ControlFlow::Continue(())
        });
        if end == SearchEnd::BudgetExceeded {
            return BulbArrangement::Unknown;
        }

        if bulb_counts.iter().any(|&count| count >= 2) {
            return BulbArrangement::Series;
        }

        let covered: usize = bulb_counts.iter().sum();
        let paths_with_bulb = bulb_counts.iter().filter(|&&count| count > 0).count();
        if bulb_counts.len() >= 2 && covered >= 2 && paths_with_bulb >= 2 {
            BulbArrangement::Parallel
        } else {
            BulbArrangement::Unknown
        }
    }

    /// Check whether two components touch through any chain of junctions,
    /// regardless of switch state.
    pub fn components_connected(&self, a: ComponentId, b: ComponentId) -> Result<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        let topology = Topology::build(&self.components, self.config.merge_radius);
        Ok(topology
            .graph
            .reachable(topology.endpoints[a][0], topology.endpoints[b][0]))
    }

    fn battery_index(&self) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.kind() == ElectricKind::Battery)
    }

    fn index_of(&self, id: ComponentId) -> Result<usize> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SandboxError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Battery on top, bulb on the right, and `bottom` closing the square.
    ///
    /// ```text
    ///   (260,120)--battery--(340,120)
    ///       |                   |
    ///     wire                bulb
    ///       |                   |
    ///   (260,200)--bottom---(340,200)
    /// ```
    fn square(bottom: ElectricKind) -> (ElectricCircuit, ComponentId, ComponentId) {
        let mut circuit = ElectricCircuit::new();
        circuit.place(ElectricKind::Battery, Point::new(300.0, 120.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(260.0, 160.0), 90);
        let bulb = circuit.place(ElectricKind::Bulb, Point::new(340.0, 160.0), 90);
        let closing = circuit.place(bottom, Point::new(300.0, 200.0), 0);
        (circuit, bulb, closing)
    }

    #[test]
    fn test_closed_loop_lights_bulb() {
        let (mut circuit, bulb, _) = square(ElectricKind::Wire);
        assert_eq!(circuit.simulate(), SimulationResult::ClosedCircuit);
        assert!(circuit.component(bulb).unwrap().is_lit());
        assert_eq!(circuit.lit_bulbs(), vec![bulb]);
    }

    #[test]
    fn test_open_switch_breaks_loop() {
        let (mut circuit, bulb, switch) = square(ElectricKind::Switch);
        assert_eq!(circuit.simulate(), SimulationResult::SwitchOff);
        assert!(!circuit.component(bulb).unwrap().is_lit());

        assert!(circuit.toggle_switch(switch).unwrap());
        assert_eq!(circuit.simulation_result(), SimulationResult::ClosedCircuit);
        assert!(circuit.component(bulb).unwrap().is_lit());
    }

    #[test]
    fn test_missing_segment_is_open() {
        let (mut circuit, bulb, bottom) = square(ElectricKind::Wire);
        circuit.remove_component(bottom).unwrap();
        assert_eq!(circuit.simulation_result(), SimulationResult::OpenCircuit);
        assert!(!circuit.component(bulb).unwrap().is_lit());
    }

    #[test]
    fn test_lone_battery_is_open() {
        let mut circuit = ElectricCircuit::new();
        circuit.place(ElectricKind::Battery, Point::new(300.0, 120.0), 0);
        assert_eq!(circuit.simulate(), SimulationResult::OpenCircuit);
    }

    #[test]
    fn test_removing_battery() {
        let (mut circuit, bulb, _) = square(ElectricKind::Wire);
        circuit.simulate();
        let battery = circuit.components()[0].id;
        circuit.remove_component(battery).unwrap();
        assert_eq!(circuit.simulation_result(), SimulationResult::NoBattery);
        assert!(!circuit.component(bulb).unwrap().is_lit());
    }

    #[test]
    fn test_simulate_is_idempotent() {
        let (mut circuit, _, _) = square(ElectricKind::Resistor);
        let first = circuit.simulate();
        let bulbs_first = circuit.lit_bulbs();
        let second = circuit.simulate();
        assert_eq!(first, second);
        assert_eq!(bulbs_first, circuit.lit_bulbs());
    }

    #[test]
    fn test_parallel_branch_bypasses_open_switch() {
        let (mut circuit, bulb, _) = square(ElectricKind::Switch);
        // Second route from (260,200) to (340,200) one row lower.
        circuit.place(ElectricKind::Wire, Point::new(260.0, 240.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(300.0, 280.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(340.0, 240.0), 90);
        assert_eq!(circuit.simulate(), SimulationResult::ClosedCircuit);
        assert!(circuit.component(bulb).unwrap().is_lit());
    }

    #[test]
    fn test_endpoints_merge_within_radius() {
        let mut circuit = ElectricCircuit::new();
        circuit.place(ElectricKind::Battery, Point::new(300.0, 120.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(270.0, 170.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(330.0, 170.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(300.0, 220.0), 0);
        assert_eq!(circuit.simulate(), SimulationResult::ClosedCircuit);
    }

    #[test]
    fn test_search_budget_is_enforced() {
        let (circuit, _, _) = square(ElectricKind::Wire);
        let mut circuit = ElectricCircuit {
            config: SimulationConfig::new().with_max_search_steps(1),
            ..circuit
        };
        assert_eq!(circuit.simulate(), SimulationResult::OpenCircuit);
    }

    #[test]
    fn test_classify_series() {
        let (mut circuit, _, bottom) = square(ElectricKind::Bulb);
        circuit.simulate();
        assert!(circuit.component(bottom).unwrap().is_lit());
        assert_eq!(circuit.classify_bulbs(), BulbArrangement::Series);
    }

    #[test]
    fn test_classify_parallel() {
        let mut circuit = ElectricCircuit::new();
        circuit.place(ElectricKind::Battery, Point::new(300.0, 120.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(260.0, 160.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(340.0, 160.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(300.0, 200.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(260.0, 240.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(340.0, 240.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(300.0, 280.0), 0);
        assert_eq!(circuit.classify_bulbs(), BulbArrangement::Parallel);
    }

    /// Three rungs under the battery: one bulb, one bulb, then two bulbs in
    /// series down the sides.
    fn ladder(config: SimulationConfig) -> ElectricCircuit {
        let mut circuit = ElectricCircuit::with_config(config);
        circuit.place(ElectricKind::Battery, Point::new(300.0, 120.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(260.0, 160.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(340.0, 160.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(300.0, 200.0), 0);
        circuit.place(ElectricKind::Wire, Point::new(260.0, 240.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(340.0, 240.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(300.0, 280.0), 0);
        circuit.place(ElectricKind::Bulb, Point::new(260.0, 320.0), 90);
        circuit.place(ElectricKind::Bulb, Point::new(340.0, 320.0), 90);
        circuit.place(ElectricKind::Wire, Point::new(300.0, 360.0), 0);
        circuit
    }

    #[test]
    fn test_classify_series_branch_in_ladder() {
        let circuit = ladder(SimulationConfig::default());
        assert_eq!(circuit.classify_bulbs(), BulbArrangement::Series);
    }

    #[test]
    fn test_classify_unknown_when_budget_runs_out() {
        // Enough steps to find the two single-bulb rungs but not the series one.
        let mut circuit = ladder(SimulationConfig::new().with_max_search_steps(20));
        assert_eq!(circuit.simulate(), SimulationResult::ClosedCircuit);
        assert_eq!(circuit.classify_bulbs(), BulbArrangement::Unknown);
    }

    #[test]
    fn test_classify_needs_two_bulbs() {
        let (circuit, _, _) = square(ElectricKind::Wire);
        assert_eq!(circuit.classify_bulbs(), BulbArrangement::Unknown);
    }

    #[test]
    fn test_components_connected_ignores_switch_state() {
        let (circuit, bulb, switch) = square(ElectricKind::Switch);
        let battery = circuit.components()[0].id;
        assert!(circuit.components_connected(battery, switch).unwrap());
        assert!(circuit.components_connected(bulb, switch).unwrap());
    }

    #[test]
    fn test_isolated_component_not_connected() {
        let (mut circuit, bulb, _) = square(ElectricKind::Wire);
        let far = circuit.place(ElectricKind::Wire, Point::new(800.0, 600.0), 0);
        assert!(!circuit.components_connected(bulb, far).unwrap());
    }

    #[test]
    fn test_add_component_rejections() {
        let mut circuit = ElectricCircuit::new();
        let id = circuit.add_component(ElectricKind::Battery, 320.0, 120.0, 0).unwrap();
        assert!(matches!(
            circuit.add_component(ElectricKind::Wire, 325.0, 125.0, 0),
            Err(SandboxError::PositionOccupied { .. })
        ));
        assert!(matches!(
            circuit.add_component(ElectricKind::Wire, 100.0, 300.0, 0),
            Err(SandboxError::PositionInPanel { .. })
        ));
        assert!(matches!(
            circuit.add_component(ElectricKind::Wire, f64::NAN, 300.0, 0),
            Err(SandboxError::InvalidPosition { .. })
        ));
        assert_eq!(circuit.components().len(), 1);
        assert_eq!(circuit.components()[0].id, id);
    }

    #[test]
    fn test_custom_grid_and_config() {
        let grid = Grid {
            size: 40.0,
            panel_width: 0.0,
            panel_margin: 0.0,
        };
        let config = SimulationConfig::new().with_merge_radius(10.0);
        let mut circuit = ElectricCircuit::with_config(config.clone()).with_grid(grid);
        assert_eq!(circuit.config(), &config);

        // Without a palette zone, x = 50 snaps to 40 and is accepted.
        let id = circuit.add_component(ElectricKind::Wire, 50.0, 50.0, 0).unwrap();
        assert_eq!(circuit.component(id).unwrap().position, Point::new(40.0, 40.0));
    }

    #[test]
    fn test_toggle_non_switch_fails() {
        let (mut circuit, bulb, _) = square(ElectricKind::Wire);
        assert!(matches!(
            circuit.toggle_switch(bulb),
            Err(SandboxError::NotASwitch { .. })
        ));
    }

    #[test]
    fn test_rotation_moves_endpoints() {
        let (mut circuit, bulb, _) = square(ElectricKind::Wire);
        circuit.simulate();
        circuit.rotate_component(bulb).unwrap();
        assert_eq!(circuit.component(bulb).unwrap().rotation, 180);
        assert_eq!(circuit.simulation_result(), SimulationResult::OpenCircuit);
        // At 270 degrees the endpoints are swapped but still close the loop.
        circuit.rotate_component(bulb).unwrap();
        assert_eq!(circuit.simulation_result(), SimulationResult::ClosedCircuit);
    }

    #[test]
    fn test_update_defers_simulation() {
        let (mut circuit, _, bottom) = square(ElectricKind::Wire);
        circuit.simulate();
        circuit
            .update_component(bottom, ComponentUpdate::new().with_position(600.0, 600.0))
            .unwrap();
        assert_eq!(circuit.simulation_result(), SimulationResult::ClosedCircuit);
        assert_eq!(circuit.simulate(), SimulationResult::OpenCircuit);
    }

    #[test]
    fn test_unknown_id() {
        let mut circuit = ElectricCircuit::new();
        assert!(matches!(
            circuit.remove_component(ComponentId(7)),
            Err(SandboxError::ComponentNotFound { .. })
        ));
    }
}
