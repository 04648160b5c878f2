//! Structured region classification.
//!
//! The second pipeline stage: turns a validated [`FlowGraph`](crate::cfg::FlowGraph)
//! into a [`Region`] tree using the producer's merge declarations, checked
//! against the dominator tree. The tree partitions the reachable blocks;
//! graphs whose declarations cannot be honored are rejected rather than
//! restructured.

mod classifier;
mod region;

pub use classifier::RegionClassifier;
pub use region::{Region, SwitchCase};
