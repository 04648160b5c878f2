// Copyright 2026 The spvscope Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # spvscope
//!
//! A framework for analyzing and decompiling SPIR-V shader functions. Built
//! in pure Rust, `spvscope` ingests a typed module model (types, constants,
//! global variables, and per-function instruction streams) and re-synthesizes
//! each function as a structured statement/expression tree, relying on the
//! producer-declared selection and loop merge annotations instead of
//! heuristic control-flow recovery.
//!
//! ## Features
//!
//! - **Typed module model** - Interned types, constants, globals, and raw
//!   per-function instruction streams
//! - **Block graph construction** - Stream grouping with strict validation
//!   of terminators, branch targets, and reachability
//! - **Dominance-checked structuring** - Loops, conditionals, and switches
//!   classified from declared merges and verified against the dominator tree
//! - **Faithful value translation** - Composite construct/extract with exact
//!   bounds diagnostics, access chains, and constant folding
//! - **Parallel batch driver** - Whole-module translation with fail-fast and
//!   collect-all-errors modes
//!
//! ## Quick Start
//!
//! ```rust
//! use spvscope::prelude::*;
//!
//! let mut module = Module::new();
//! let void = module.types.register(Type::Void)?;
//! module.add_function(Function {
//!     id: ValueId::new(100),
//!     name: Some("main".to_string()),
//!     return_type: void,
//!     control: FunctionControl::empty(),
//!     params: Vec::new(),
//!     body: vec![
//!         FunctionInst::Label(BlockId::new(1)),
//!         FunctionInst::Terminator(Terminator::Return { value: None }),
//!     ],
//! });
//!
//! let emitted = translate_module(&module)?;
//! assert_eq!(emitted[0].name, "main");
//! # Ok::<(), spvscope::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! Translation of one function runs in fixed stages, each consuming the
//! previous stage's output:
//!
//! 1. [`cfg`] - groups the raw stream into basic blocks and builds the
//!    validated flow graph
//! 2. [`structurizer`] - classifies the graph into a region tree using the
//!    declared merges and the dominator tree
//! 3. [`emit`] - renders regions into [`ast`] statements, translating SSA
//!    values into expressions along the way
//!
//! [`translate_module`] and [`translate_module_best_effort`] fan this
//! pipeline out across a module's functions.
//!
//! ## Thread Safety
//!
//! A [`Module`](module::Module) is frozen before translation begins and the
//! pipeline only ever reads it, so the batch drivers translate functions in
//! parallel without locking.

pub mod ast;
pub mod cfg;
pub mod emit;
mod error;
pub mod graph;
pub mod module;
pub mod prelude;
pub mod structurizer;
mod translate;

pub use error::{AggregateKind, Error};
pub use translate::{translate_module, translate_module_best_effort};

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
