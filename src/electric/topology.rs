//! Junction topology rebuilt from component geometry.

use std::collections::HashMap;

use crate::components::ElectricComponent;
use crate::spatial::{NodeGraph, NodeId};

/// Node graph plus a junction-to-component index for one simulation run.
#[derive(Debug)]
pub(crate) struct Topology {
    pub graph: NodeGraph,
    /// Raw `[start, end]` nodes per component, in component order.
    pub endpoints: Vec<[NodeId; 2]>,
    /// Junctions the two endpoints merged into, in component order.
    pub ends: Vec<[NodeId; 2]>,
    attached: HashMap<NodeId, Vec<usize>>,
}

impl Topology {
    /// Register every endpoint, linking each component's own two endpoints.
    pub fn build(components: &[ElectricComponent], merge_radius: f64) -> Self {
        let mut graph = NodeGraph::with_radius(merge_radius);
        let mut endpoints = Vec::with_capacity(components.len());
        let mut ends = Vec::with_capacity(components.len());
        let mut attached: HashMap<NodeId, Vec<usize>> = HashMap::new();

        for (idx, component) in components.iter().enumerate() {
            let start = graph.create(component.start());
            let end = graph.create(component.end());
            graph.link(start, end);

            let start_junction = graph.register(start);
            let end_junction = graph.register(end);

            attached.entry(start_junction).or_default().push(idx);
            if end_junction != start_junction {
                attached.entry(end_junction).or_default().push(idx);
            }

            endpoints.push([start, end]);
            ends.push([start_junction, end_junction]);
        }

        log::debug!(
            "electric topology: {} components, {} nodes, {} junctions",
            components.len(),
            graph.nodes().len(),
            graph.junctions().len()
        );

        Self {
            graph,
            endpoints,
            ends,
            attached,
        }
    }

    /// Components with an endpoint at `junction`, in component order.
    pub fn attached(&self, junction: NodeId) -> &[usize] {
        self.attached.get(&junction).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The junction on the far side of `component` when entering at `from`.
    pub fn across(&self, component: usize, from: NodeId) -> NodeId {
        let [start, end] = self.ends[component];
        if start == from {
            end
        } else {
            start
        }
    }
}
