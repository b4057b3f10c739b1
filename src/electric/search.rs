//! Closed-loop search between battery terminals.
//!
//! An explicit stack of frames replaces recursion. A component is marked as
//! on-path when its frame is pushed and unmarked when the frame is popped, so
//! every simple path is explored (parallel branches included) and the
//! backtracking invariant is visible in one place.

use std::ops::ControlFlow;

use super::topology::Topology;
use crate::components::ElectricComponent;
use crate::spatial::NodeId;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchEnd {
    /// Every path was visited.
    Exhausted,
    /// The visitor asked to stop.
    Stopped,
    /// The step budget ran out before the search finished.
    BudgetExceeded,
}

struct Frame {
    junction: NodeId,
    /// Component traversed to reach this junction.
    via: Option<usize>,
    /// Next index into the junction's attached components.
    next: usize,
}

/// Walks conductive paths from a battery's `start` terminal to its `end`.
pub(crate) struct LoopSearch<'a> {
    components: &'a [ElectricComponent],
    topology: &'a Topology,
    max_steps: usize,
}

impl<'a> LoopSearch<'a> {
    pub fn new(
        components: &'a [ElectricComponent],
        topology: &'a Topology,
        max_steps: usize,
    ) -> Self {
        Self {
            components,
            topology,
            max_steps,
        }
    }

    /// Call `visit` with the component indices of each path found.
    ///
    /// The battery itself is excluded up front; otherwise its own body would
    /// join its two terminals.
    pub fn for_each_path<F>(&self, battery: usize, mut visit: F) -> SearchEnd
    where
        F: FnMut(&[usize]) -> ControlFlow<()>,
    {
        let [start, target] = self.topology.ends[battery];
        let mut on_path = vec![false; self.components.len()];
        on_path[battery] = true;

        let mut path: Vec<usize> = Vec::new();
        let mut stack = vec![Frame {
            junction: start,
            via: None,
            next: 0,
        }];
        let mut steps = 0usize;

        while let Some(frame) = stack.last_mut() {
            let junction = frame.junction;
            let Some(&component) = self.topology.attached(junction).get(frame.next) else {
                if let Some(Frame { via: Some(done), .. }) = stack.pop() {
                    on_path[done] = false;
                    path.pop();
                }
                continue;
            };
            frame.next += 1;

            if on_path[component] || !self.components[component].conducts() {
                continue;
            }

            steps += 1;
            if steps > self.max_steps {
                log::warn!(
                    "loop search stopped after {} steps without finishing",
                    self.max_steps
                );
                return SearchEnd::BudgetExceeded;
            }

            let next = self.topology.across(component, junction);
            path.push(component);

            if next == target {
                let flow = visit(&path);
                path.pop();
                if flow.is_break() {
                    return SearchEnd::Stopped;
                }
                continue;
            }

            on_path[component] = true;
            stack.push(Frame {
                junction: next,
                via: Some(component),
                next: 0,
            });
        }

        SearchEnd::Exhausted
    }

    /// Check whether any conductive path closes the loop.
    pub fn has_closed_loop(&self, battery: usize) -> bool {
        self.for_each_path(battery, |_| ControlFlow::Break(())) == SearchEnd::Stopped
    }
}
