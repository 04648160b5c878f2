//! Dominator tree computation and queries.
//!
//! Uses the iterative reverse-postorder dataflow algorithm (Cooper, Harvey,
//! Kennedy): immediate dominators are refined over RPO sweeps until a fixed
//! point, intersecting along idom chains with postorder numbers. On the
//! small, shallow graphs of shader functions this converges in one or two
//! sweeps and is deterministic because successor lists are visited in block
//! declaration order.

use crate::graph::algorithms::reverse_postorder;
use crate::graph::{NodeId, Predecessors, RootedGraph, Successors};

/// An immediate-dominator tree over the nodes reachable from a graph's root.
///
/// All queries are O(depth) pointer chases over a dense `Vec`; the tree is
/// immutable once computed. Callers must only pass nodes that were reachable
/// at computation time (the flow graph guarantees this by rejecting
/// unreachable blocks before analysis).
#[derive(Debug, Clone)]
pub struct DominatorTree {
    root: NodeId,
    /// `idom[n]` is n's immediate dominator; the root maps to itself.
    idom: Vec<NodeId>,
}

impl DominatorTree {
    /// Computes the dominator tree of `graph`.
    pub fn compute<G>(graph: &G) -> Self
    where
        G: RootedGraph + Successors + Predecessors,
    {
        let root = graph.root();
        let order = reverse_postorder(graph);

        let mut rank = vec![usize::MAX; graph.node_count()];
        for (i, n) in order.iter().enumerate() {
            rank[n.index()] = i;
        }

        let mut idom: Vec<Option<NodeId>> = vec![None; graph.node_count()];
        idom[root.index()] = Some(root);

        let mut changed = true;
        while changed {
            changed = false;
            for &node in order.iter().skip(1) {
                let mut new_idom: Option<NodeId> = None;
                for pred in graph.predecessors(node) {
                    if idom[pred.index()].is_none() {
                        continue;
                    }
                    new_idom = Some(match new_idom {
                        None => pred,
                        Some(current) => Self::intersect(&idom, &rank, pred, current),
                    });
                }
                if let Some(new_idom) = new_idom {
                    if idom[node.index()] != Some(new_idom) {
                        idom[node.index()] = Some(new_idom);
                        changed = true;
                    }
                }
            }
        }

        let idom = idom
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.unwrap_or(NodeId::new(i)))
            .collect();
        Self { root, idom }
    }

    fn intersect(idom: &[Option<NodeId>], rank: &[usize], a: NodeId, b: NodeId) -> NodeId {
        let (mut a, mut b) = (a, b);
        while a != b {
            while rank[a.index()] > rank[b.index()] {
                a = idom[a.index()].unwrap_or(a);
            }
            while rank[b.index()] > rank[a.index()] {
                b = idom[b.index()].unwrap_or(b);
            }
        }
        a
    }

    /// The root of the tree.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Immediate dominator of `node`, `None` for the root.
    #[must_use]
    pub fn immediate_dominator(&self, node: NodeId) -> Option<NodeId> {
        if node == self.root {
            None
        } else {
            Some(self.idom[node.index()])
        }
    }

    /// True when `a` dominates `b` (reflexively).
    #[must_use]
    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        let mut current = b;
        loop {
            if current == a {
                return true;
            }
            if current == self.root {
                return false;
            }
            current = self.idom[current.index()];
        }
    }
}
