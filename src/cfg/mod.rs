//! Block graph construction: raw instruction streams to control-flow graphs.
//!
//! This is the first stage of the pipeline. It groups a function's flat
//! [`FunctionInst`](crate::module::FunctionInst) stream into
//! [`BasicBlock`]s, resolves branch targets into typed edges, and rejects
//! streams that are malformed before any structural analysis begins.

mod block;
mod builder;
mod edge;
mod graph;

pub use block::BasicBlock;
pub use builder::build_flow_graph;
pub use edge::CfgEdgeKind;
pub use graph::FlowGraph;
