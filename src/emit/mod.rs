//! Emission: from classified regions to the structured program.
//!
//! Three collaborators, one per concern: [`ExpressionTranslator`] turns SSA
//! values and instructions into expressions, [`StatementSynthesizer`] walks
//! the region tree with the exit-target stack, and [`emit_function`] strings
//! the pipeline together for one function.

mod expressions;
mod function;
mod statements;

pub use expressions::ExpressionTranslator;
pub use function::{emit_function, StructuredFunction, SymbolTable};
pub use statements::StatementSynthesizer;
