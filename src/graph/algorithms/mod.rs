//! Graph algorithms: depth-first orderings and dominator trees.

mod dominators;
mod traversal;

pub use dominators::DominatorTree;
pub use traversal::{postorder, reverse_postorder};
