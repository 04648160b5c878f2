//! The typed module model: types, constants, globals, and functions.
//!
//! A [`Module`] is the frozen input of translation. Producers (a binary
//! parser, or tests building modules by hand) populate it with builder-style
//! registration calls; the translator only ever reads it, which is what makes
//! the batch driver's parallel fan-out safe.
//!
//! # Examples
//!
//! ```rust
//! use spvscope::module::{Constant, Module, Type, ValueId};
//!
//! let mut module = Module::new();
//! let u32_ty = module.types.register(Type::U32)?;
//! module.define_constant(ValueId::new(1), u32_ty, Constant::U32(42));
//! assert!(module.constant(ValueId::new(1)).is_some());
//! # Ok::<(), spvscope::Error>(())
//! ```

mod constants;
mod function;
mod ids;
mod instruction;
mod types;

pub use constants::{Constant, ConstantDef};
pub use function::{
    Function, FunctionControl, FunctionInst, FunctionParam, LoopControl, MergeDecl,
    SelectionControl, Terminator,
};
pub use ids::{BlockId, TypeId, ValueId};
pub use instruction::{BinaryOp, Instruction, Op, UnaryOp};
pub use types::{StorageClass, StructMember, Type, TypeRegistry};

use std::collections::HashMap;

/// A module-scope variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVar {
    /// The variable's value id. The value is a pointer.
    pub id: ValueId,
    /// The pointer type of the variable.
    pub ty: TypeId,
    /// Storage class of the variable's memory.
    pub class: StorageClass,
    /// Optional constant initializer.
    pub initializer: Option<ValueId>,
}

/// A complete input module: the shared, read-only context of translation.
#[derive(Debug, Default, Clone)]
pub struct Module {
    /// The interning type registry.
    pub types: TypeRegistry,
    constants: HashMap<ValueId, ConstantDef>,
    globals: HashMap<ValueId, GlobalVar>,
    functions: Vec<Function>,
    debug_names: HashMap<ValueId, String>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a module-scope constant under the given result id.
    pub fn define_constant(&mut self, id: ValueId, ty: TypeId, value: Constant) {
        self.constants.insert(id, ConstantDef { ty, value });
    }

    /// Defines a module-scope variable.
    pub fn define_global(&mut self, global: GlobalVar) {
        self.globals.insert(global.id, global);
    }

    /// Attaches a producer-declared debug name to a value id.
    pub fn set_debug_name(&mut self, id: ValueId, name: impl Into<String>) {
        self.debug_names.insert(id, name.into());
    }

    /// Appends a function. Declaration order is preserved and determines
    /// batch-driver output order.
    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    /// Looks up a constant definition.
    #[must_use]
    pub fn constant(&self, id: ValueId) -> Option<&ConstantDef> {
        self.constants.get(&id)
    }

    /// Looks up a module-scope variable.
    #[must_use]
    pub fn global(&self, id: ValueId) -> Option<&GlobalVar> {
        self.globals.get(&id)
    }

    /// Iterates all module-scope variables, in no particular order.
    pub fn globals(&self) -> impl Iterator<Item = &GlobalVar> {
        self.globals.values()
    }

    /// Looks up a producer-declared debug name.
    #[must_use]
    pub fn debug_name(&self, id: ValueId) -> Option<&str> {
        self.debug_names.get(&id).map(String::as_str)
    }

    /// The module's functions in declaration order.
    #[must_use]
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_registration() {
        let mut module = Module::new();
        let u32_ty = module.types.register(Type::U32).unwrap();
        module.define_constant(ValueId::new(1), u32_ty, Constant::U32(5));
        let def = module.constant(ValueId::new(1)).unwrap();
        assert_eq!(def.value, Constant::U32(5));
        assert!(module.constant(ValueId::new(2)).is_none());
    }

    #[test]
    fn test_debug_names() {
        let mut module = Module::new();
        module.set_debug_name(ValueId::new(7), "position");
        assert_eq!(module.debug_name(ValueId::new(7)), Some("position"));
        assert_eq!(module.debug_name(ValueId::new(8)), None);
    }

    #[test]
    fn test_function_order_preserved() {
        let mut module = Module::new();
        let void = module.types.register(Type::Void).unwrap();
        for id in [10, 20, 30] {
            module.add_function(Function {
                id: ValueId::new(id),
                name: None,
                return_type: void,
                control: FunctionControl::empty(),
                params: Vec::new(),
                body: Vec::new(),
            });
        }
        let ids: Vec<u32> = module.functions().iter().map(|f| f.id.raw()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
