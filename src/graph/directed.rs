//! Adjacency-list directed graph.

use crate::graph::{GraphBase, NodeId, Predecessors, Successors};

/// A directed graph with node payloads of type `N` and edge payloads of
/// type `E`, stored as forward and backward adjacency lists.
///
/// Nodes and edges are append-only; the structures built on top (dominator
/// trees, region trees) assume the graph is frozen once analysis begins.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, E> {
    nodes: Vec<N>,
    succs: Vec<Vec<(NodeId, E)>>,
    preds: Vec<Vec<NodeId>>,
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            succs: Vec::new(),
            preds: Vec::new(),
        }
    }
}

impl<N, E> DirectedGraph<N, E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, returning its dense id.
    pub fn add_node(&mut self, payload: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(payload);
        self.succs.push(Vec::new());
        self.preds.push(Vec::new());
        id
    }

    /// Adds a directed edge with a payload.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, payload: E) {
        self.succs[from.index()].push((to, payload));
        self.preds[to.index()].push(from);
    }

    /// Borrows a node's payload.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &N {
        &self.nodes[id.index()]
    }

    /// Iterates all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Iterates the out-edges of a node as `(target, payload)` pairs.
    pub fn edges(&self, from: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.succs[from.index()].iter().map(|(to, e)| (*to, e))
    }
}

impl<N, E> GraphBase for DirectedGraph<N, E> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<N, E> Successors for DirectedGraph<N, E> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.succs[node.index()].iter().map(|(to, _)| *to)
    }
}

impl<N, E> Predecessors for DirectedGraph<N, E> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.preds[node.index()].iter().copied()
    }
}
