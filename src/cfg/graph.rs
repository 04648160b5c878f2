//! The per-function flow graph.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::cfg::{BasicBlock, CfgEdgeKind};
use crate::graph::{
    DirectedGraph, DominatorTree, GraphBase, NodeId, Predecessors, RootedGraph, Successors,
};
use crate::module::BlockId;

/// The control-flow graph of one function.
///
/// Nodes carry [`BasicBlock`]s and are allocated in block declaration order,
/// so `NodeId` rank equals declaration rank. Every node is reachable from the
/// entry (the builder rejects unreachable blocks), which lets dominance
/// queries assume total coverage.
///
/// The dominator tree is computed lazily on first use and cached.
#[derive(Debug)]
pub struct FlowGraph {
    graph: DirectedGraph<BasicBlock, CfgEdgeKind>,
    entry: NodeId,
    by_label: HashMap<BlockId, NodeId>,
    dominators: OnceLock<DominatorTree>,
}

impl FlowGraph {
    pub(crate) fn new(
        graph: DirectedGraph<BasicBlock, CfgEdgeKind>,
        entry: NodeId,
        by_label: HashMap<BlockId, NodeId>,
    ) -> Self {
        Self {
            graph,
            entry,
            by_label,
            dominators: OnceLock::new(),
        }
    }

    /// The entry node.
    #[must_use]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Borrows a block by node id.
    #[must_use]
    pub fn block(&self, node: NodeId) -> &BasicBlock {
        self.graph.node(node)
    }

    /// Resolves a block label to its node.
    #[must_use]
    pub fn node_of(&self, label: BlockId) -> Option<NodeId> {
        self.by_label.get(&label).copied()
    }

    /// Iterates all nodes in block declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        self.graph.node_ids()
    }

    /// Iterates the out-edges of a node with their kinds.
    pub fn edges(&self, from: NodeId) -> impl Iterator<Item = (NodeId, &CfgEdgeKind)> + '_ {
        self.graph.edges(from)
    }

    /// The dominator tree, computed on first use.
    pub fn dominator_tree(&self) -> &DominatorTree {
        self.dominators.get_or_init(|| DominatorTree::compute(self))
    }

    /// True when `a` dominates `b`.
    #[must_use]
    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        self.dominator_tree().dominates(a, b)
    }
}

impl GraphBase for FlowGraph {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Successors for FlowGraph {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.successors(node)
    }
}

impl Predecessors for FlowGraph {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.predecessors(node)
    }
}

impl RootedGraph for FlowGraph {
    fn root(&self) -> NodeId {
        self.entry
    }
}
