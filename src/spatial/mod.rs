//! Spatial connection graph.
//!
//! Components never reference each other directly. Each one owns endpoint
//! [`Node`]s placed in workspace coordinates, and the [`NodeGraph`] decides
//! which endpoints form a junction by asking a [`MergePolicy`]. The default
//! policy, [`ProximityMerge`], joins endpoints that are strictly closer than
//! a fixed radius.

mod graph;
mod merge;
mod types;

pub use graph::NodeGraph;
pub use merge::{MergePolicy, ProximityMerge};
pub use types::*;
