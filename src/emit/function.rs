//! The per-function emission façade.

use std::collections::HashMap;

use crate::ast::Statement;
use crate::cfg::build_flow_graph;
use crate::emit::{ExpressionTranslator, StatementSynthesizer};
use crate::module::{Function, Module, TypeId, ValueId};
use crate::structurizer::RegionClassifier;
use crate::Result;

/// Names for the values of one function.
///
/// Producer-declared debug names win; everything else falls back to the
/// `x_<id>` convention, which keeps reconstructed output diffable against
/// the source disassembly.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: HashMap<ValueId, String>,
}

impl SymbolTable {
    /// Collects declared names from the module's debug information: globals,
    /// parameters, and the function's instruction results.
    #[must_use]
    pub fn new(module: &Module, function: &Function) -> Self {
        let mut names = HashMap::new();
        for global in module.globals() {
            if let Some(name) = module.debug_name(global.id) {
                names.insert(global.id, name.to_string());
            }
        }
        for param in &function.params {
            let declared = param
                .name
                .clone()
                .or_else(|| module.debug_name(param.id).map(str::to_string));
            if let Some(name) = declared {
                names.insert(param.id, name);
            }
        }
        for inst in &function.body {
            if let crate::module::FunctionInst::Op(op) = inst {
                if let Some(result) = op.result {
                    if let Some(name) = module.debug_name(result) {
                        names.insert(result, name.to_string());
                    }
                }
            }
        }
        Self { names }
    }

    /// The declared or defaulted name of a value.
    #[must_use]
    pub fn name(&self, id: ValueId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("x_{id}"))
    }
}

/// A reconstructed function: structured statements plus signature naming.
#[derive(Debug, Clone)]
pub struct StructuredFunction {
    /// The source function's id.
    pub id: ValueId,
    /// Function name: declared, debug, or `x_<id>`.
    pub name: String,
    /// Parameter names and types in declaration order.
    pub params: Vec<(String, TypeId)>,
    /// Declared return type.
    pub return_type: TypeId,
    /// The structured body.
    pub body: Vec<Statement>,
}

/// Translates one function end to end: flow graph, region tree, statements.
///
/// # Errors
/// Propagates the first failure of any pipeline stage; the caller (batch
/// driver) wraps it with the function id.
pub fn emit_function(module: &Module, function: &Function) -> Result<StructuredFunction> {
    let graph = build_flow_graph(function)?;
    let region = RegionClassifier::classify(&graph)?;

    let symbols = SymbolTable::new(module, function);
    let exprs = ExpressionTranslator::new(module, function, &symbols);
    let synthesizer = StatementSynthesizer::new(&graph, &exprs);
    let body = synthesizer.synthesize(&region)?;

    let name = function
        .name
        .clone()
        .or_else(|| module.debug_name(function.id).map(str::to_string))
        .unwrap_or_else(|| format!("x_{}", function.id));
    let params = function
        .params
        .iter()
        .map(|param| (symbols.name(param.id), param.ty))
        .collect();

    Ok(StructuredFunction {
        id: function.id,
        name,
        params,
        return_type: function.return_type,
        body,
    })
}
