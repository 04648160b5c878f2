//! Graph capability traits.
//!
//! Algorithms in [`crate::graph::algorithms`] are written against these
//! traits rather than a concrete container, so the flow graph can expose its
//! block-level structure without copying it into a second representation.

use crate::graph::NodeId;

/// Base capability: a finite node set addressed by dense [`NodeId`]s.
pub trait GraphBase {
    /// Number of nodes in the graph. Node ids range over `0..node_count()`.
    fn node_count(&self) -> usize;
}

/// Forward adjacency.
pub trait Successors: GraphBase {
    /// Iterates the successors of `node` in edge insertion order.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;
}

/// Backward adjacency.
pub trait Predecessors: GraphBase {
    /// Iterates the predecessors of `node` in edge insertion order.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_;
}

/// A graph with a distinguished entry node.
pub trait RootedGraph: GraphBase {
    /// The entry node all traversals start from.
    fn root(&self) -> NodeId;
}
