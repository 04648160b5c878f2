//! Generic rooted-digraph infrastructure.
//!
//! The flow graph in [`crate::cfg`] is a thin wrapper over the containers and
//! algorithms here; nothing in this module knows about blocks, instructions,
//! or merge declarations.

pub mod algorithms;
mod directed;
mod node;
mod traits;

pub use algorithms::{postorder, reverse_postorder, DominatorTree};
pub use directed::DirectedGraph;
pub use node::NodeId;
pub use traits::{GraphBase, Predecessors, RootedGraph, Successors};
