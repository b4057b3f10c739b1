//! Logic circuit model.
//!
//! [`LogicCircuit::simulate`] runs three steps on every call:
//!
//! 1. Infer wiring: each input port takes its value from another
//!    component's output port lying within the merge radius.
//! 2. Reset values: fixed inputs take their constant, everything else
//!    becomes undefined.
//! 3. Propagate: sweep all non-input components in placement order,
//!    re-evaluating each from its inputs, until a sweep changes nothing or
//!    the iteration cap is hit. Hitting the cap keeps the last values; the
//!    returned [`Propagation`] reports whether the network settled.

mod gates;
mod wiring;

pub use gates::evaluate_gate;

use crate::components::{ComponentId, LogicComponent, LogicKind, LogicValue};
use crate::config::SimulationConfig;
use crate::error::{Result, SandboxError};
use crate::placement::{ComponentUpdate, Grid, ROTATION_STEP};
use crate::spatial::{normalize_rotation, Point};

use wiring::Wiring;

/// Value seen by one output probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputValue {
    pub id: ComponentId,
    pub value: LogicValue,
}

/// One inferred output-to-input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: ComponentId,
    pub to: ComponentId,
    /// Input port index on `to`.
    pub input: usize,
}

/// Summary of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    /// Sweeps performed.
    pub sweeps: usize,
    /// False when the iteration cap stopped a still-changing network.
    pub converged: bool,
}

/// A workspace of logic components.
#[derive(Debug, Clone)]
pub struct LogicCircuit {
    components: Vec<LogicComponent>,
    config: SimulationConfig,
    grid: Grid,
    next_id: usize,
    last_run: Option<Propagation>,
}

impl Default for LogicCircuit {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicCircuit {
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
            last_run: None,
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
    pub fn components(&self) -> &[LogicComponent] {
        &self.components
    }

    /// Look up a component.
    pub fn component(&self, id: ComponentId) -> Option<&LogicComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Report of the last simulation run, if any.
    pub fn last_run(&self) -> Option<Propagation> {
        self.last_run
    }

    /// Place a component at a snapped grid position and simulate.
    pub fn add_component(
        &mut self,
        kind: LogicKind,
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
    /// Does not simulate.
    pub fn place(&mut self, kind: LogicKind, position: Point, rotation: i32) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.components
            .push(LogicComponent::new(id, kind, position, rotation));
        id
    }

    /// Remove a component and simulate.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.components.remove(idx);
        self.simulate();
        Ok(())
    }

    /// Apply a partial update without simulating. `closed` is ignored.
    pub fn update_component(&mut self, id: ComponentId, update: ComponentUpdate) -> Result<()> {
        let idx = self.index_of(id)?;
        let component = &mut self.components[idx];
        component.position = update.apply_position(component.position);
        if let Some(rotation) = update.rotation {
            component.rotation = normalize_rotation(rotation);
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

    /// Remove every component.
    pub fn clear(&mut self) {
        self.components.clear();
        self.last_run = None;
    }

    /// Output-to-input edges implied by the current geometry.
    pub fn connections(&self) -> Vec<Connection> {
        let wiring = Wiring::infer(&self.components, self.config.merge_radius);
        wiring
            .sources
            .iter()
            .enumerate()
            .flat_map(|(to, feeds)| {
                feeds.iter().enumerate().filter_map(move |(input, source)| {
                    source.map(|from| (from, to, input))
                })
            })
            .map(|(from, to, input)| Connection {
                from: self.components[from].id,
                to: self.components[to].id,
                input,
            })
            .collect()
    }

    /// Check whether `a`'s output feeds `b` directly or through other
    /// components.
    pub fn drives(&self, a: ComponentId, b: ComponentId) -> Result<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        let wiring = Wiring::infer(&self.components, self.config.merge_radius);
        let mut seen = vec![false; self.components.len()];
        let mut stack = vec![b];
        while let Some(current) = stack.pop() {
            for source in wiring.sources[current].iter().flatten().copied() {
                if source == a {
                    return Ok(true);
                }
                if !seen[source] {
                    seen[source] = true;
                    stack.push(source);
                }
            }
        }
        Ok(false)
    }

    /// Check whether an output port and an input port are linked in the
    /// inferred port graph.
    pub fn ports_linked(
        &self,
        output_of: ComponentId,
        input_of: ComponentId,
        input: usize,
    ) -> Result<bool> {
        let from = self.index_of(output_of)?;
        let to = self.index_of(input_of)?;
        let wiring = Wiring::infer(&self.components, self.config.merge_radius);
        Ok(wiring.inputs[to]
            .get(input)
            .is_some_and(|&port| wiring.graph.reachable(wiring.outputs[from], port)))
    }

    /// Re-infer wiring and propagate values to a fixpoint.
    pub fn simulate(&mut self) -> Propagation {
        let wiring = Wiring::infer(&self.components, self.config.merge_radius);

        for component in &mut self.components {
            component.value = component.kind.initial_value();
        }

        let cap = self.config.max_iterations;
        let mut changed = true;
        let mut sweeps = 0usize;

        while changed && sweeps < cap {
            changed = false;
            sweeps += 1;

            for idx in 0..self.components.len() {
                let kind = self.components[idx].kind;
                if kind.is_fixed_input() {
                    continue;
                }

                let inputs: Vec<LogicValue> = wiring.sources[idx]
                    .iter()
                    .map(|source| {
                        source
                            .map(|s| self.components[s].value)
                            .unwrap_or(LogicValue::Undefined)
                    })
                    .collect();

                let value = evaluate_gate(kind, &inputs);
                if value != self.components[idx].value {
                    self.components[idx].value = value;
                    changed = true;
                }
            }

            log::trace!("logic sweep {sweeps}: changed={changed}");
        }

        let converged = !changed;
        if !converged {
            log::warn!("logic propagation hit the {cap} sweep cap without settling");
        }

        let run = Propagation { sweeps, converged };
        self.last_run = Some(run);
        run
    }

    /// Values of all output probes, in placement order.
    pub fn get_outputs(&self) -> Vec<OutputValue> {
        self.components
            .iter()
            .filter(|c| c.kind == LogicKind::Output)
            .map(|c| OutputValue {
                id: c.id,
                value: c.value,
            })
            .collect()
    }

    /// True when there is at least one output and all of them show `expected`.
    pub fn all_outputs_equal(&self, expected: LogicValue) -> bool {
        let outputs = self.get_outputs();
        !outputs.is_empty() && outputs.iter().all(|o| o.value == expected)
    }

    fn index_of(&self, id: ComponentId) -> Result<usize> {
        self.components
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SandboxError::not_found(id))
    }
}
