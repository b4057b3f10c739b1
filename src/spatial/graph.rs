//! Node graph with proximity merging.

use std::collections::VecDeque;

use super::{MergePolicy, Node, NodeId, Point, ProximityMerge};

/// Arena of endpoint nodes plus the list of junctions they merge into.
///
/// Every node stays owned by the component that created it. Registering a
/// node either makes it a new junction or links it to the first existing
/// junction the [`MergePolicy`] accepts. The scan is linear in the number of
/// junctions, which is fine for the tens of components a workspace holds.
#[derive(Debug, Clone)]
pub struct NodeGraph<P = ProximityMerge> {
    nodes: Vec<Node>,
    junctions: Vec<NodeId>,
    policy: P,
}

impl NodeGraph<ProximityMerge> {
    /// Create a graph that merges within `radius`.
    pub fn with_radius(radius: f64) -> Self {
        Self::new(ProximityMerge::new(radius))
    }
}

impl Default for NodeGraph<ProximityMerge> {
    fn default() -> Self {
        Self::new(ProximityMerge::default())
    }
}

impl<P: MergePolicy> NodeGraph<P> {
    /// Create an empty graph using `policy`.
    pub fn new(policy: P) -> Self {
        Self {
            nodes: Vec::new(),
            junctions: Vec::new(),
            policy,
        }
    }

    /// Allocate a node without registering it as a junction.
    pub fn create(&mut self, position: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, position));
        id
    }

    /// Register a node, returning the junction it belongs to.
    ///
    /// The first junction within merge distance wins and is linked to the
    /// node. Otherwise the node becomes a junction of its own.
    pub fn register(&mut self, id: NodeId) -> NodeId {
        let position = self.nodes[id.0].position;
        let existing = self
            .junctions
            .iter()
            .copied()
            .find(|&j| j != id && self.policy.merges(self.nodes[j.0].position, position));

        match existing {
            Some(junction) => {
                self.link(junction, id);
                junction
            }
            None => {
                if !self.junctions.contains(&id) {
                    self.junctions.push(id);
                }
                id
            }
        }
    }

    /// Allocate and register a node in one step.
    pub fn insert(&mut self, position: Point) -> (NodeId, NodeId) {
        let id = self.create(position);
        (id, self.register(id))
    }

    /// Link two nodes so each is one hop from the other.
    ///
    /// # Panics
    ///
    /// Panics if an id was created by a different graph.
    pub fn link(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        self.nodes[a.0].links.insert(b);
        self.nodes[b.0].links.insert(a);
    }

    /// Check whether two nodes are directly linked.
    ///
    /// # Panics
    ///
    /// Panics if an id was created by a different graph.
    pub fn is_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a.0].is_linked_to(b)
    }

    /// Check whether a chain of links leads from `a` to `b`.
    ///
    /// # Panics
    ///
    /// Panics if an id was created by a different graph.
    pub fn reachable(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([a]);
        visited[a.0] = true;

        while let Some(current) = queue.pop_front() {
            for &next in &self.nodes[current.0].links {
                if next == b {
                    return true;
                }
                if !visited[next.0] {
                    visited[next.0] = true;
                    queue.push_back(next);
                }
            }
        }

        false
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if an id was created by a different graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All allocated nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes that act as junctions, in registration order.
    pub fn junctions(&self) -> &[NodeId] {
        &self.junctions
    }

    /// The active merge policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_symmetric() {
        let mut graph: NodeGraph = NodeGraph::default();
        let a = graph.create(Point::new(0.0, 0.0));
        let b = graph.create(Point::new(100.0, 0.0));
        graph.link(a, b);
        assert!(graph.is_linked(a, b));
        assert!(graph.is_linked(b, a));
    }

    #[test]
    fn test_reachable_is_transitive() {
        let mut graph: NodeGraph = NodeGraph::default();
        let a = graph.create(Point::new(0.0, 0.0));
        let b = graph.create(Point::new(100.0, 0.0));
        let c = graph.create(Point::new(200.0, 0.0));
        let d = graph.create(Point::new(300.0, 0.0));
        graph.link(a, b);
        graph.link(b, c);
        assert!(graph.reachable(a, c));
        assert!(graph.reachable(c, a));
        assert!(!graph.is_linked(a, c));
        assert!(!graph.reachable(a, d));
    }

    #[test]
    fn test_register_merges_close_nodes() {
        let mut graph: NodeGraph = NodeGraph::default();
        let (a, ja) = graph.insert(Point::new(0.0, 0.0));
        let (b, jb) = graph.insert(Point::new(10.0, 10.0));
        assert_eq!(ja, a);
        assert_eq!(jb, a);
        assert!(graph.is_linked(a, b));
        assert_eq!(graph.junctions(), &[a]);
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn test_register_keeps_distant_nodes_apart() {
        let mut graph: NodeGraph = NodeGraph::default();
        let (a, _) = graph.insert(Point::new(0.0, 0.0));
        let (b, jb) = graph.insert(Point::new(25.0, 0.0));
        assert_eq!(jb, b);
        assert!(!graph.reachable(a, b));
        assert_eq!(graph.junctions().len(), 2);
    }

    #[test]
    fn test_first_junction_wins() {
        let mut graph: NodeGraph = NodeGraph::default();
        let (a, _) = graph.insert(Point::new(0.0, 0.0));
        let (_, jb) = graph.insert(Point::new(40.0, 0.0));
        let (_, jc) = graph.insert(Point::new(20.0, 0.0));
        assert_ne!(jb, a);
        assert_eq!(jc, a);
    }

    #[test]
    fn test_with_radius_sets_policy() {
        let mut graph = NodeGraph::with_radius(5.0);
        assert_eq!(graph.policy().radius(), 5.0);
        let default: NodeGraph = NodeGraph::default();
        assert_eq!(default.policy(), &ProximityMerge::default());

        let (_, ja) = graph.insert(Point::new(0.0, 0.0));
        let (_, jb) = graph.insert(Point::new(6.0, 0.0));
        assert_ne!(ja, jb);
    }

    #[test]
    fn test_custom_policy() {
        struct Never;
        impl MergePolicy for Never {
            fn merges(&self, _: Point, _: Point) -> bool {
                false
            }
        }

        let mut graph = NodeGraph::new(Never);
        let (_, ja) = graph.insert(Point::new(0.0, 0.0));
        let (_, jb) = graph.insert(Point::new(0.0, 0.0));
        assert_ne!(ja, jb);
    }
}
