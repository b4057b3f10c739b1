//! Output-to-input connection inference.

use crate::components::LogicComponent;
use crate::spatial::{MergePolicy, NodeGraph, NodeId, ProximityMerge};

/// Inferred wiring for one evaluation.
///
/// `sources[c][i]` is the index of the component whose output feeds input
/// `i` of component `c`. Only output-to-input pairs are considered, so two
/// wire segments that touch anywhere else stay unconnected.
#[derive(Debug)]
pub(crate) struct Wiring {
    pub graph: NodeGraph,
    pub sources: Vec<Vec<Option<usize>>>,
    pub inputs: Vec<Vec<NodeId>>,
    pub outputs: Vec<NodeId>,
}

impl Wiring {
    pub fn infer(components: &[LogicComponent], merge_radius: f64) -> Self {
        let policy = ProximityMerge::new(merge_radius);
        let mut graph = NodeGraph::new(policy);

        let inputs: Vec<Vec<NodeId>> = components
            .iter()
            .map(|c| c.input_ports().into_iter().map(|p| graph.create(p)).collect())
            .collect();
        let outputs: Vec<NodeId> = components
            .iter()
            .map(|c| graph.create(c.output_port()))
            .collect();

        let mut sources = Vec::with_capacity(components.len());
        let mut edges = 0usize;

        for (idx, ports) in inputs.iter().enumerate() {
            let mut feeds = vec![None; ports.len()];
            for (slot, &input) in ports.iter().enumerate() {
                let at = graph.node(input).position;
                for (other, &output) in outputs.iter().enumerate() {
                    if other == idx {
                        continue;
                    }
                    // Later matches overwrite earlier ones.
                    if policy.merges(graph.node(output).position, at) {
                        feeds[slot] = Some(other);
                    }
                }
                if let Some(source) = feeds[slot] {
                    graph.link(outputs[source], input);
                    edges += 1;
                }
            }
            sources.push(feeds);
        }

        log::debug!(
            "logic wiring: {} components, {} inferred edges",
            components.len(),
            edges
        );

        Self {
            graph,
            sources,
            inputs,
            outputs,
        }
    }
}
