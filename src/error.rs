use std::fmt;

use thiserror::Error;

use crate::module::{BlockId, TypeId, ValueId};

/// The aggregate kind recorded by a [`Error::CompositeIndexOutOfBounds`]
/// failure, carrying the exact bound that was violated.
///
/// The `Display` form of this type is a compatibility surface: tooling greps
/// translator output for phrases like `vector of 2 elements` and
/// `structure %23 having 3 elements`, so the wording must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    /// A vector with the given component count.
    Vector(u32),
    /// A matrix with the given column count.
    Matrix(u32),
    /// A structure type (identified for the diagnostic) with the given
    /// member count.
    Structure(TypeId, u32),
}

impl AggregateKind {
    /// Returns the arity bound that an extract index was checked against.
    #[must_use]
    pub const fn bound(&self) -> u32 {
        match self {
            AggregateKind::Vector(n) | AggregateKind::Matrix(n) => *n,
            AggregateKind::Structure(_, n) => *n,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateKind::Vector(n) => write!(f, "vector of {n} elements"),
            AggregateKind::Matrix(n) => write!(f, "matrix of {n} elements"),
            AggregateKind::Structure(ty, n) => {
                write!(f, "structure %{ty} having {n} elements")
            }
        }
    }
}

/// The generic Error type, which provides coverage for all errors this library
/// can potentially return.
///
/// Every failure is terminal for the *single function* being translated: the
/// function emitter returns the error and never partial output. The batch
/// driver decides whether to abort the module or collect errors across
/// functions (see [`crate::translate`]).
///
/// # Error Categories
///
/// ## Block graph construction
/// - [`Error::EmptyFunction`] - Function body contains no blocks
/// - [`Error::MalformedControlFlow`] - Missing/garbled terminators, dangling
///   branch targets, unreachable blocks
///
/// ## Structured classification
/// - [`Error::UnstructuredLoop`] - A declared loop merge does not
///   self-consistently describe the CFG
/// - [`Error::IrreducibleControlFlow`] - Branching with no declared structure
///   that does not reconverge at an enclosing merge
///
/// ## Value translation
/// - [`Error::CompositeIndexOutOfBounds`] - Extract index exceeds the
///   aggregate's arity
/// - [`Error::RuntimeArrayExtract`] - Compile-time extract from a
///   runtime-sized array
///
/// # Diagnostics format
///
/// Instruction-level errors render as `<Opcode> %<result-id> <message>`
/// (e.g. `CompositeExtract %2 index value 3 is out of bounds for matrix of
/// 3 elements`); block-level errors render as a bare structural message.
/// The wording is a compatibility surface: downstream tooling matches on
/// it, so it must stay stable.
#[derive(Error, Debug)]
pub enum Error {
    /// The function body declared no basic blocks at all.
    #[error("function body has no blocks")]
    EmptyFunction,

    /// The raw instruction stream or branch structure is malformed.
    ///
    /// Raised by the block graph builder when a block lacks a terminator, a
    /// branch names a label that does not exist in the function, or a block
    /// is unreachable from the function entry. Unreachable code is treated
    /// as an authoring defect, never silently dropped.
    #[error("{message}")]
    MalformedControlFlow {
        /// The block at or near which the defect was detected.
        block: BlockId,
        /// Human-readable description of the defect.
        message: String,
    },

    /// A declared `LoopMerge` does not self-consistently describe the CFG.
    ///
    /// Raised when the loop body escapes past the declared merge/continue
    /// targets, the continue target lies outside the body, or the merge
    /// block is not dominated by the header.
    #[error("{message}")]
    UnstructuredLoop {
        /// The loop header block carrying the offending declaration.
        block: BlockId,
        /// Human-readable description of the inconsistency.
        message: String,
    },

    /// Control flow diverges without producer-declared structure.
    ///
    /// This reader relies entirely on declared selection/loop merges; it
    /// does not attempt relooper-style node splitting. Any multi-way branch
    /// whose targets do not reconverge at an already-known merge is
    /// rejected with this error.
    #[error("{message}")]
    IrreducibleControlFlow {
        /// The block whose terminator could not be classified.
        block: BlockId,
        /// Human-readable description of the rejected shape.
        message: String,
    },

    /// A `CompositeExtract` index exceeds the aggregate's arity.
    ///
    /// Carries the offending instruction's result id, the requested index,
    /// and the [`AggregateKind`] with the exact bound that was violated, so
    /// the rendered text can name `vector of 2 elements`, `matrix of 3
    /// elements`, or `structure %23 having 3 elements` precisely.
    #[error("CompositeExtract %{result} index value {index} is out of bounds for {kind}")]
    CompositeIndexOutOfBounds {
        /// Result id of the offending extract instruction.
        result: ValueId,
        /// The requested (invalid) index.
        index: u32,
        /// The aggregate kind and its true bound.
        kind: AggregateKind,
    },

    /// A compile-time extract was attempted on a runtime-sized array.
    ///
    /// Indexing a runtime array is only meaningful through a pointer access
    /// chain; a constant-index `CompositeExtract` over one is never valid.
    #[error("can't do OpCompositeExtract on a runtime array")]
    RuntimeArrayExtract,

    /// A type id did not resolve in the module's type registry.
    #[error("no type registered for id %{0}")]
    TypeNotFound(TypeId),

    /// A value id did not resolve to a constant, global, or instruction
    /// result in the current function.
    #[error("no value defined for id %{0}")]
    ValueNotFound(ValueId),

    /// Internal translator defect with a free-form description.
    ///
    /// Used for conditions that indicate a bug in the producer's module
    /// rather than one of the structured taxonomy entries above.
    #[error("{0}")]
    Translation(String),

    /// A per-function error annotated with the failing function's id.
    ///
    /// Produced by the batch driver so callers can tell which function of a
    /// module failed without losing the underlying error kind.
    #[error("function %{function}: {source}")]
    Function {
        /// Identifier of the function whose translation failed.
        function: ValueId,
        /// The underlying translation error.
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps this error with the id of the function being translated.
    #[must_use]
    pub fn in_function(self, function: ValueId) -> Self {
        Error::Function {
            function,
            source: Box::new(self),
        }
    }
}
