//! Depth-first orderings.

use crate::graph::{NodeId, RootedGraph, Successors};

/// Computes a postorder of the nodes reachable from the root.
///
/// The traversal follows successor lists in declaration order with an
/// explicit stack, so the ordering is deterministic for a given graph.
pub fn postorder<G>(graph: &G) -> Vec<NodeId>
where
    G: RootedGraph + Successors,
{
    let mut order = Vec::with_capacity(graph.node_count());
    let mut visited = vec![false; graph.node_count()];
    // (node, next successor index) pairs
    let mut stack: Vec<(NodeId, usize)> = vec![(graph.root(), 0)];
    visited[graph.root().index()] = true;

    while let Some(&mut (node, ref mut next)) = stack.last_mut() {
        let succ = graph.successors(node).nth(*next);
        *next += 1;
        match succ {
            Some(s) if !visited[s.index()] => {
                visited[s.index()] = true;
                stack.push((s, 0));
            }
            Some(_) => {}
            None => {
                order.push(node);
                stack.pop();
            }
        }
    }
    order
}

/// Computes a reverse postorder: the root first, every node before all of
/// its non-back-edge successors.
pub fn reverse_postorder<G>(graph: &G) -> Vec<NodeId>
where
    G: RootedGraph + Successors,
{
    let mut order = postorder(graph);
    order.reverse();
    order
}
