//! The structured region tree.

use crate::graph::NodeId;

/// One arm of a [`Region::Switch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Selector values matched by this arm, in declaration order.
    pub selectors: Vec<i64>,
    /// True when this arm is (or absorbs) the default target.
    pub default: bool,
    /// Entry node of the arm, `None` when the arm target is the merge block.
    /// Fallthrough from the preceding arm resolves against this node.
    pub entry: Option<NodeId>,
    /// Arm body, `None` when the arm target is the merge block.
    pub body: Option<Region>,
}

/// A node of the structured region tree.
///
/// The tree partitions the reachable blocks of a flow graph: every block
/// appears in exactly one `Block` leaf (or as the `header` of a compound
/// region, which also owns the header's straight-line instructions). The
/// statement synthesizer walks this tree; it never needs to consult CFG
/// edges again except to re-resolve terminator targets against its exit
/// stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// A single basic block. Its terminator is rendered by the synthesizer
    /// against the enclosing exit stack.
    Block(NodeId),
    /// Consecutive regions executed in order.
    Sequence(Vec<Region>),
    /// A two-way conditional with a declared selection merge.
    If {
        /// The block whose conditional terminator heads the construct. Its
        /// instructions run before the branch.
        header: NodeId,
        /// True arm, `None` when the true edge targets the merge directly.
        then_branch: Option<Box<Region>>,
        /// False arm, `None` when the false edge targets the merge directly.
        else_branch: Option<Box<Region>>,
    },
    /// A declared loop. The body starts with the header block itself; the
    /// header's terminator typically becomes a guarded break.
    Loop {
        /// The block carrying the loop merge declaration.
        header: NodeId,
        /// Loop body, beginning at the header.
        body: Box<Region>,
        /// Continuing construct, `None` when the continue target is the
        /// header itself.
        continuing: Option<Box<Region>>,
    },
    /// A multi-way switch with a declared selection merge.
    Switch {
        /// The block whose switch terminator heads the construct.
        header: NodeId,
        /// Arms in first-occurrence order of their targets; the default arm
        /// is last unless it folded into a case arm.
        cases: Vec<SwitchCase>,
    },
    /// A bare transfer: an edge that leaves the enclosing construct through
    /// the exit stack (break, continue, or fallthrough) without a block of
    /// its own. Arises when a conditional arm targets an exit directly.
    Transfer {
        /// The transfer's target node.
        target: NodeId,
    },
}
