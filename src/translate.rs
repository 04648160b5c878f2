//! Module-level batch translation.
//!
//! Functions are independent once the module is frozen, so the drivers fan
//! out across them with rayon. Output order always matches declaration
//! order regardless of scheduling.

use rayon::prelude::*;

use crate::emit::{emit_function, StructuredFunction};
use crate::module::Module;
use crate::{Error, Result};

/// Translates every function of the module, failing fast.
///
/// Results are gathered per function and only then reduced, so the returned
/// error does not depend on which worker happened to finish first.
///
/// # Errors
/// Returns the first (in declaration order) function's error, wrapped with
/// that function's id. No partial output is produced.
pub fn translate_module(module: &Module) -> Result<Vec<StructuredFunction>> {
    let results: Vec<Result<StructuredFunction>> = module
        .functions()
        .par_iter()
        .map(|function| {
            emit_function(module, function).map_err(|e| e.in_function(function.id))
        })
        .collect();
    results.into_iter().collect()
}

/// Translates every function of the module, collecting all failures.
///
/// A module with any failing function yields no output at all: either every
/// function translated and the full list is returned, or the complete list
/// of per-function errors is.
///
/// # Errors
/// The per-function errors in declaration order, each wrapped with its
/// function's id.
pub fn translate_module_best_effort(
    module: &Module,
) -> std::result::Result<Vec<StructuredFunction>, Vec<Error>> {
    let results: Vec<Result<StructuredFunction>> = module
        .functions()
        .par_iter()
        .map(|function| {
            emit_function(module, function).map_err(|e| e.in_function(function.id))
        })
        .collect();

    let mut emitted = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(function) => emitted.push(function),
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() {
        Ok(emitted)
    } else {
        Err(errors)
    }
}
