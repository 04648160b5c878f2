//! # spvscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the spvscope library. Import this module to get quick access to the
//! essential types for building modules and translating them.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all spvscope operations
pub use crate::Error;

/// The result type used throughout spvscope
pub use crate::Result;

/// Aggregate kinds carried by composite bounds diagnostics
pub use crate::AggregateKind;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Whole-module translation, failing at the first bad function
pub use crate::translate_module;

/// Whole-module translation, collecting every per-function error
pub use crate::translate_module_best_effort;

/// Single-function translation façade
pub use crate::emit::emit_function;

// ================================================================================================
// Module Model
// ================================================================================================

/// The frozen input module
pub use crate::module::Module;

/// Identifier newtypes
pub use crate::module::{BlockId, TypeId, ValueId};

/// The type system and its interning registry
pub use crate::module::{StorageClass, StructMember, Type, TypeRegistry};

/// Constants and module-scope variables
pub use crate::module::{Constant, ConstantDef, GlobalVar};

/// Functions and their raw instruction streams
pub use crate::module::{
    Function, FunctionControl, FunctionInst, FunctionParam, LoopControl, MergeDecl,
    SelectionControl, Terminator,
};

/// Value instructions
pub use crate::module::{BinaryOp, Instruction, Op, UnaryOp};

// ================================================================================================
// Output
// ================================================================================================

/// The reconstructed structured program
pub use crate::ast::{Expression, Literal, Statement, SwitchArm};

/// A translated function with its named signature
pub use crate::emit::StructuredFunction;
