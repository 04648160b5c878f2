//! Basic blocks.

use crate::module::{BlockId, Instruction, MergeDecl, Terminator};

/// A basic block: a label, straight-line value instructions, an optional
/// structured-flow declaration, and exactly one terminator.
///
/// Blocks are produced by the builder from the function's flat instruction
/// stream; `position` records the declaration order, which the classifier
/// uses as the deterministic walk order.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    /// The block's label.
    pub label: BlockId,
    /// Value instructions in stream order.
    pub instructions: Vec<Instruction>,
    /// Structured-flow declaration attached to the terminator, if any.
    pub merge: Option<MergeDecl>,
    /// The block's terminator.
    pub terminator: Terminator,
    /// Zero-based declaration position within the function.
    pub position: usize,
}
