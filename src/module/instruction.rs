//! Value instructions: the straight-line body of a basic block.
//!
//! Every instruction either produces exactly one SSA value (`result` and
//! `result_type` set) or is a pure side effect (`Store`, `Barrier`). Branches
//! never appear here; block termination lives in
//! [`Terminator`](crate::module::Terminator).

use strum::{Display, IntoStaticStr};

use crate::module::{StorageClass, TypeId, ValueId};

/// Binary arithmetic, logic, and comparison operators.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    #[strum(serialize = "+")]
    Add,
    /// Subtraction.
    #[strum(serialize = "-")]
    Sub,
    /// Multiplication.
    #[strum(serialize = "*")]
    Mul,
    /// Division.
    #[strum(serialize = "/")]
    Div,
    /// Remainder.
    #[strum(serialize = "%")]
    Mod,
    /// Bitwise and.
    #[strum(serialize = "&")]
    And,
    /// Bitwise or.
    #[strum(serialize = "|")]
    Or,
    /// Bitwise exclusive or.
    #[strum(serialize = "^")]
    Xor,
    /// Left shift.
    #[strum(serialize = "<<")]
    Shl,
    /// Right shift.
    #[strum(serialize = ">>")]
    Shr,
    /// Equality comparison.
    #[strum(serialize = "==")]
    Eq,
    /// Inequality comparison.
    #[strum(serialize = "!=")]
    Ne,
    /// Less-than comparison.
    #[strum(serialize = "<")]
    Lt,
    /// Less-or-equal comparison.
    #[strum(serialize = "<=")]
    Le,
    /// Greater-than comparison.
    #[strum(serialize = ">")]
    Gt,
    /// Greater-or-equal comparison.
    #[strum(serialize = ">=")]
    Ge,
    /// Short-circuit logical and.
    #[strum(serialize = "&&")]
    LogicalAnd,
    /// Short-circuit logical or.
    #[strum(serialize = "||")]
    LogicalOr,
}

/// Unary operators.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation.
    #[strum(serialize = "-")]
    Neg,
    /// Logical or bitwise complement.
    #[strum(serialize = "!")]
    Not,
}

/// The operation performed by an [`Instruction`].
///
/// The `Display` / `IntoStaticStr` forms give the opcode name used in
/// instruction-level diagnostics (`<Opcode> %<result-id> <message>`).
#[derive(Debug, Display, IntoStaticStr, Clone, PartialEq)]
pub enum Op {
    /// Two-operand arithmetic, logic, or comparison.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: ValueId,
        /// Right operand.
        rhs: ValueId,
    },
    /// One-operand negation or complement.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: ValueId,
    },
    /// Builds an aggregate value from per-element operands. Operand count
    /// must match the result type's arity exactly.
    CompositeConstruct {
        /// Element values in aggregate order.
        operands: Vec<ValueId>,
    },
    /// Reads a nested element of an aggregate value with literal indices.
    CompositeExtract {
        /// The aggregate being indexed.
        composite: ValueId,
        /// Literal index path, outermost first.
        indices: Vec<u32>,
    },
    /// Derives a pointer to a nested element of a pointed-at aggregate.
    /// Unlike `CompositeExtract`, indices are value ids and may step through
    /// runtime-sized arrays.
    AccessChain {
        /// The base pointer.
        base: ValueId,
        /// Index values, outermost first.
        indices: Vec<ValueId>,
    },
    /// Reads through a pointer.
    Load {
        /// Pointer to read.
        pointer: ValueId,
    },
    /// Writes through a pointer. Produces no result.
    Store {
        /// Pointer to write.
        pointer: ValueId,
        /// Value to store.
        value: ValueId,
    },
    /// Introduces a function-scope pointer variable.
    Variable {
        /// Storage class, `Function` for locals.
        class: StorageClass,
        /// Optional initializer constant.
        initializer: Option<ValueId>,
    },
    /// Execution/memory barrier. Produces no result.
    Barrier,
}

/// A single value instruction inside a basic block.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Result id, `None` for `Store` and `Barrier`.
    pub result: Option<ValueId>,
    /// Declared result type, present exactly when `result` is.
    pub result_type: Option<TypeId>,
    /// The operation.
    pub op: Op,
}

impl Instruction {
    /// Creates a result-producing instruction.
    #[must_use]
    pub fn with_result(result: ValueId, result_type: TypeId, op: Op) -> Self {
        Self {
            result: Some(result),
            result_type: Some(result_type),
            op,
        }
    }

    /// Creates a side-effect-only instruction (`Store`, `Barrier`).
    #[must_use]
    pub fn effect(op: Op) -> Self {
        Self {
            result: None,
            result_type: None,
            op,
        }
    }
}
