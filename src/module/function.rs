//! Functions and their raw instruction streams.
//!
//! A [`Function`] body arrives as a flat [`FunctionInst`] stream, exactly as
//! a binary reader would produce it: labels open blocks, merge declarations
//! annotate the terminator that follows them, and terminators close blocks.
//! The block graph builder in [`crate::cfg`] is responsible for grouping the
//! stream and rejecting malformed shapes.

use bitflags::bitflags;

use crate::module::{BlockId, Instruction, TypeId, ValueId};

bitflags! {
    /// Hint mask carried by a selection merge declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SelectionControl: u32 {
        /// Producer requests branch flattening.
        const FLATTEN = 0x1;
        /// Producer forbids branch flattening.
        const DONT_FLATTEN = 0x2;
    }
}

bitflags! {
    /// Hint mask carried by a loop merge declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LoopControl: u32 {
        /// Producer requests unrolling.
        const UNROLL = 0x1;
        /// Producer forbids unrolling.
        const DONT_UNROLL = 0x2;
    }
}

bitflags! {
    /// Hint mask declared on a function.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FunctionControl: u32 {
        /// Producer requests inlining.
        const INLINE = 0x1;
        /// Producer forbids inlining.
        const DONT_INLINE = 0x2;
        /// Function has no side effects beyond its result.
        const PURE = 0x4;
        /// Function result depends only on its arguments.
        const CONST = 0x8;
    }
}

/// A structured-control-flow declaration attached to a block terminator.
///
/// These are the producer's promises about reconvergence; the classifier
/// validates them against the dominance structure instead of discovering
/// structure itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecl {
    /// Declares where a conditional or switch reconverges.
    Selection {
        /// The merge block: first block after the construct.
        merge: BlockId,
        /// Pass-through hint mask.
        control: SelectionControl,
    },
    /// Declares a loop's merge block and continue target.
    Loop {
        /// The merge block: first block after the loop.
        merge: BlockId,
        /// The continue target: the back-edge block of each iteration.
        continue_target: BlockId,
        /// Pass-through hint mask.
        control: LoopControl,
    },
}

impl MergeDecl {
    /// The declared merge block.
    #[must_use]
    pub const fn merge(&self) -> BlockId {
        match self {
            MergeDecl::Selection { merge, .. } | MergeDecl::Loop { merge, .. } => *merge,
        }
    }
}

/// A block-terminating branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    /// Return from the function, with an optional value.
    Return {
        /// Returned value, `None` for void functions.
        value: Option<ValueId>,
    },
    /// Unconditional branch.
    Branch {
        /// Branch target label.
        target: BlockId,
    },
    /// Two-way conditional branch.
    BranchConditional {
        /// Boolean condition value.
        condition: ValueId,
        /// Target when the condition holds.
        true_target: BlockId,
        /// Target when the condition does not hold.
        false_target: BlockId,
    },
    /// Multi-way branch over an integer selector.
    Switch {
        /// Integer selector value.
        selector: ValueId,
        /// Target when no case matches.
        default: BlockId,
        /// `(selector value, target)` pairs in declaration order. Several
        /// values may name the same target.
        cases: Vec<(i64, BlockId)>,
    },
    /// Statically unreachable end of a block. Emits nothing.
    Unreachable,
}

/// One element of a function's raw instruction stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionInst {
    /// Opens a new basic block with the given label.
    Label(BlockId),
    /// Structured-flow declaration; must directly precede its terminator.
    Merge(MergeDecl),
    /// A value instruction.
    Op(Instruction),
    /// Closes the current block.
    Terminator(Terminator),
}

/// A formal parameter of a [`Function`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParam {
    /// The parameter's value id.
    pub id: ValueId,
    /// Declared parameter type.
    pub ty: TypeId,
    /// Producer-declared debug name, when present.
    pub name: Option<String>,
}

/// A function of the module: signature plus raw body stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function's own value id.
    pub id: ValueId,
    /// Producer-declared debug name, when present.
    pub name: Option<String>,
    /// Declared return type; registered `Void` for value-less functions.
    pub return_type: TypeId,
    /// Pass-through hint mask.
    pub control: FunctionControl,
    /// Formal parameters in declaration order.
    pub params: Vec<FunctionParam>,
    /// Flat instruction stream, grouped into blocks by [`crate::cfg`].
    pub body: Vec<FunctionInst>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_decl_merge_accessor() {
        let sel = MergeDecl::Selection {
            merge: BlockId::new(99),
            control: SelectionControl::empty(),
        };
        assert_eq!(sel.merge(), BlockId::new(99));
        let lp = MergeDecl::Loop {
            merge: BlockId::new(50),
            continue_target: BlockId::new(40),
            control: LoopControl::UNROLL,
        };
        assert_eq!(lp.merge(), BlockId::new(50));
    }

    #[test]
    fn test_control_masks() {
        let c = FunctionControl::INLINE | FunctionControl::PURE;
        assert!(c.contains(FunctionControl::INLINE));
        assert!(!c.contains(FunctionControl::CONST));
        assert_eq!(SelectionControl::default(), SelectionControl::empty());
    }
}
