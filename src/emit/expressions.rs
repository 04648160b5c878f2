//! Translation of SSA values and instructions into expressions.
//!
//! Every result-producing instruction gets a right-hand-side expression;
//! uses of a value become identifier references (or inline literals for
//! scalar constants). Composite extracts narrow the aggregate type index by
//! index, bounds-checking vectors, matrices, and structs, and fold through
//! `CompositeConstruct` definitions and composite constants so that
//! extracting what was just constructed yields the original operand.

use std::collections::HashMap;

use crate::ast::{Expression, Literal};
use crate::emit::SymbolTable;
use crate::error::AggregateKind;
use crate::module::{Constant, ConstantDef, Function, FunctionInst, Instruction, Module, Op, Type, TypeId, ValueId};
use crate::{Error, Result};

const VECTOR_MEMBERS: [&str; 4] = ["x", "y", "z", "w"];

/// Translates value ids and instructions of one function into expressions.
///
/// Read-only over the module and function; safe to share across the
/// synthesis of a whole function body.
pub struct ExpressionTranslator<'a> {
    module: &'a Module,
    symbols: &'a SymbolTable,
    /// Defining instruction per result id, for narrowing and folding.
    defs: HashMap<ValueId, &'a Instruction>,
    /// Parameter types by id.
    params: HashMap<ValueId, TypeId>,
}

impl<'a> ExpressionTranslator<'a> {
    /// Indexes the function's definitions for translation.
    #[must_use]
    pub fn new(module: &'a Module, function: &'a Function, symbols: &'a SymbolTable) -> Self {
        let mut defs = HashMap::new();
        for inst in &function.body {
            if let FunctionInst::Op(op) = inst {
                if let Some(result) = op.result {
                    defs.insert(result, op);
                }
            }
        }
        let params = function.params.iter().map(|p| (p.id, p.ty)).collect();
        Self {
            module,
            symbols,
            defs,
            params,
        }
    }

    /// The module this translator reads from.
    #[must_use]
    pub fn module(&self) -> &'a Module {
        self.module
    }

    /// The symbol table naming this function's values.
    #[must_use]
    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Expression for a *use* of a value: an inline literal for scalar
    /// constants, an identifier reference otherwise.
    ///
    /// # Errors
    /// [`Error::ValueNotFound`] when the id names neither a constant, a
    /// global, a parameter, nor an instruction result.
    pub fn use_of(&self, id: ValueId) -> Result<Expression> {
        if let Some(def) = self.module.constant(id) {
            return self.constant_expr(def);
        }
        if self.module.global(id).is_some()
            || self.params.contains_key(&id)
            || self.defs.contains_key(&id)
        {
            return Ok(Expression::Ident(self.symbols.name(id)));
        }
        Err(Error::ValueNotFound(id))
    }

    /// Right-hand-side expression of a result-producing instruction.
    ///
    /// # Errors
    /// Propagates operand resolution failures; extract failures surface as
    /// [`Error::CompositeIndexOutOfBounds`] and
    /// [`Error::RuntimeArrayExtract`].
    pub fn rhs(&self, inst: &Instruction) -> Result<Expression> {
        match &inst.op {
            Op::Binary { op, lhs, rhs } => Ok(Expression::Binary {
                op: *op,
                lhs: Box::new(self.use_of(*lhs)?),
                rhs: Box::new(self.use_of(*rhs)?),
            }),
            Op::Unary { op, operand } => Ok(Expression::Unary {
                op: *op,
                operand: Box::new(self.use_of(*operand)?),
            }),
            Op::CompositeConstruct { operands } => {
                let ty = inst.result_type.ok_or_else(|| {
                    Error::Translation("CompositeConstruct without a result type".to_string())
                })?;
                Ok(Expression::TypeConstructor {
                    ty,
                    operands: operands
                        .iter()
                        .map(|&operand| self.use_of(operand))
                        .collect::<Result<_>>()?,
                })
            }
            Op::CompositeExtract { composite, indices } => {
                self.extract_expr(inst, *composite, indices)
            }
            Op::AccessChain { base, indices } => self.chain_expr(*base, indices),
            Op::Load { pointer } => self.place_of(*pointer),
            Op::Store { .. } | Op::Variable { .. } | Op::Barrier => Err(Error::Translation(
                format!("{} does not produce an expression", inst.op),
            )),
        }
    }

    /// Place expression of a pointer value: the named variable, or the full
    /// accessor chain for an access-chain result.
    pub fn place_of(&self, id: ValueId) -> Result<Expression> {
        if self.module.global(id).is_some() {
            return Ok(Expression::Ident(self.symbols.name(id)));
        }
        match self.defs.get(&id).map(|inst| &inst.op) {
            Some(Op::Variable { .. }) => Ok(Expression::Ident(self.symbols.name(id))),
            Some(Op::AccessChain { base, indices }) => self.chain_expr(*base, indices),
            Some(_) => Err(Error::Translation(format!(
                "value %{id} is not a pointer"
            ))),
            None => {
                if self.params.contains_key(&id) {
                    Ok(Expression::Ident(self.symbols.name(id)))
                } else {
                    Err(Error::ValueNotFound(id))
                }
            }
        }
    }

    /// Declared type of a value.
    pub fn type_of(&self, id: ValueId) -> Result<TypeId> {
        if let Some(def) = self.module.constant(id) {
            return Ok(def.ty);
        }
        if let Some(global) = self.module.global(id) {
            return Ok(global.ty);
        }
        if let Some(&ty) = self.params.get(&id) {
            return Ok(ty);
        }
        if let Some(inst) = self.defs.get(&id) {
            return inst
                .result_type
                .ok_or_else(|| Error::Translation(format!("value %{id} has no declared type")));
        }
        Err(Error::ValueNotFound(id))
    }

    fn constant_expr(&self, def: &ConstantDef) -> Result<Expression> {
        match &def.value {
            Constant::Bool(v) => Ok(Expression::Literal(Literal::Bool(*v))),
            Constant::I32(v) => Ok(Expression::Literal(Literal::I32(*v))),
            Constant::U32(v) => Ok(Expression::Literal(Literal::U32(*v))),
            Constant::F32(v) => Ok(Expression::Literal(Literal::F32(*v))),
            Constant::Composite(elements) => Ok(Expression::TypeConstructor {
                ty: def.ty,
                operands: elements
                    .iter()
                    .map(|&element| self.use_of(element))
                    .collect::<Result<_>>()?,
            }),
        }
    }

    /// Element `index` of a value whose definition is a composite construct
    /// or a composite constant, when one exists.
    fn element_of(&self, id: ValueId, index: u32) -> Option<ValueId> {
        if let Some(inst) = self.defs.get(&id) {
            if let Op::CompositeConstruct { operands } = &inst.op {
                return operands.get(index as usize).copied();
            }
        }
        if let Some(def) = self.module.constant(id) {
            if let Constant::Composite(elements) = &def.value {
                return elements.get(index as usize).copied();
            }
        }
        None
    }

    fn extract_expr(
        &self,
        inst: &Instruction,
        composite: ValueId,
        indices: &[u32],
    ) -> Result<Expression> {
        let result = inst.result.ok_or_else(|| {
            Error::Translation("CompositeExtract without a result id".to_string())
        })?;
        let mut expr = self.use_of(composite)?;
        let mut ty_id = self.type_of(composite)?;
        // Tracks the exact source value while folding is still possible.
        let mut source = Some(composite);

        for &index in indices {
            let (next_ty, accessor) = self.step(result, ty_id, index)?;
            if let Some(id) = source {
                if let Some(element) = self.element_of(id, index) {
                    expr = self.use_of(element)?;
                    ty_id = next_ty;
                    source = Some(element);
                    continue;
                }
                source = None;
            }
            expr = accessor.apply(expr);
            ty_id = next_ty;
        }
        Ok(expr)
    }

    /// Narrows one extract step: bounds-checks the index against the
    /// aggregate and returns the element type plus the accessor to render.
    fn step(&self, result: ValueId, ty_id: TypeId, index: u32) -> Result<(TypeId, Accessor)> {
        match self.module.types.lookup(ty_id)? {
            Type::Vector { element, size } => {
                if index >= *size {
                    return Err(Error::CompositeIndexOutOfBounds {
                        result,
                        index,
                        kind: AggregateKind::Vector(*size),
                    });
                }
                Ok((*element, Accessor::Member(VECTOR_MEMBERS[index as usize].to_string())))
            }
            Type::Matrix { column, columns } => {
                if index >= *columns {
                    return Err(Error::CompositeIndexOutOfBounds {
                        result,
                        index,
                        kind: AggregateKind::Matrix(*columns),
                    });
                }
                Ok((*column, Accessor::Index(index)))
            }
            // Fixed array sizes may come from specialization constants, so
            // the index is taken on faith.
            Type::Array { element, .. } => Ok((*element, Accessor::Index(index))),
            Type::RuntimeArray { .. } => Err(Error::RuntimeArrayExtract),
            Type::Struct { members } => {
                let count = u32::try_from(members.len()).unwrap_or(u32::MAX);
                if index >= count {
                    return Err(Error::CompositeIndexOutOfBounds {
                        result,
                        index,
                        kind: AggregateKind::Structure(ty_id, count),
                    });
                }
                let member = &members[index as usize];
                Ok((member.ty, Accessor::Member(member.name.clone())))
            }
            _ => Err(Error::Translation(format!(
                "CompositeExtract %{result} indexes a non-composite type %{ty_id}"
            ))),
        }
    }

    /// Accessor chain through a pointer. Runtime arrays are legal here, and
    /// indices are values rather than literals; struct steps still require
    /// a constant index to name the member.
    fn chain_expr(&self, base: ValueId, indices: &[ValueId]) -> Result<Expression> {
        let mut expr = self.place_of(base)?;
        let base_ty = self.type_of(base)?;
        let Type::Pointer { pointee, .. } = self.module.types.lookup(base_ty)? else {
            return Err(Error::Translation(format!(
                "AccessChain base %{base} is not a pointer"
            )));
        };
        let mut ty_id = *pointee;

        for &index in indices {
            let constant_index = self
                .module
                .constant(index)
                .and_then(|def| def.value.as_index());
            match self.module.types.lookup(ty_id)? {
                Type::Vector { element, size } => {
                    match constant_index {
                        Some(i) if i < *size => {
                            expr = expr.member(VECTOR_MEMBERS[i as usize]);
                        }
                        Some(i) => {
                            return Err(Error::Translation(format!(
                                "AccessChain index value {i} is out of bounds for vector of {size} elements"
                            )));
                        }
                        None => {
                            expr = Expression::ArrayAccessor {
                                base: Box::new(expr),
                                index: Box::new(self.use_of(index)?),
                            };
                        }
                    }
                    ty_id = *element;
                }
                Type::Matrix { column, .. } => {
                    expr = Expression::ArrayAccessor {
                        base: Box::new(expr),
                        index: Box::new(self.use_of(index)?),
                    };
                    ty_id = *column;
                }
                Type::Array { element, .. } | Type::RuntimeArray { element } => {
                    expr = Expression::ArrayAccessor {
                        base: Box::new(expr),
                        index: Box::new(self.use_of(index)?),
                    };
                    ty_id = *element;
                }
                Type::Struct { members } => {
                    let Some(i) = constant_index else {
                        return Err(Error::Translation(format!(
                            "AccessChain struct member index %{index} is not a constant"
                        )));
                    };
                    let Some(member) = members.get(i as usize) else {
                        return Err(Error::Translation(format!(
                            "AccessChain index value {i} is out of bounds for structure %{ty_id} having {} elements",
                            members.len()
                        )));
                    };
                    expr = expr.member(member.name.clone());
                    ty_id = member.ty;
                }
                _ => {
                    return Err(Error::Translation(format!(
                        "AccessChain %{base} indexes a non-composite type %{ty_id}"
                    )));
                }
            }
        }
        Ok(expr)
    }
}

/// One rendered extract step.
enum Accessor {
    Member(String),
    Index(u32),
}

impl Accessor {
    fn apply(self, base: Expression) -> Expression {
        match self {
            Accessor::Member(name) => base.member(name),
            Accessor::Index(i) => base.index(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{FunctionControl, GlobalVar, StorageClass};

    fn function(body: Vec<FunctionInst>) -> Function {
        Function {
            id: ValueId::new(100),
            name: None,
            return_type: TypeId::new(0),
            control: FunctionControl::empty(),
            params: Vec::new(),
            body,
        }
    }

    /// A result-producing placeholder definition with the given type, used
    /// where only the value's declared type matters.
    fn def(id: u32, ty: TypeId) -> FunctionInst {
        FunctionInst::Op(Instruction::with_result(ValueId::new(id), ty, Op::Barrier))
    }

    fn translate<R>(
        module: &Module,
        function: &Function,
        f: impl FnOnce(&ExpressionTranslator<'_>) -> R,
    ) -> R {
        let symbols = SymbolTable::new(module, function);
        let translator = ExpressionTranslator::new(module, function, &symbols);
        f(&translator)
    }

    fn vec2_f32(module: &mut Module) -> (TypeId, TypeId) {
        let f32_ty = module.types.register(Type::F32).unwrap();
        let vec2 = module
            .types
            .register(Type::Vector { element: f32_ty, size: 2 })
            .unwrap();
        (f32_ty, vec2)
    }

    #[test]
    fn test_scalar_constant_inlines_as_literal() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        module.define_constant(ValueId::new(1), f32_ty, Constant::F32(50.0));
        let func = function(Vec::new());
        let expr = translate(&module, &func, |t| t.use_of(ValueId::new(1))).unwrap();
        assert_eq!(expr, Expression::Literal(Literal::F32(50.0)));
    }

    #[test]
    fn test_instruction_result_uses_symbol_name() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        let func = function(vec![def(2, f32_ty)]);
        let expr = translate(&module, &func, |t| t.use_of(ValueId::new(2))).unwrap();
        assert_eq!(expr, Expression::ident("x_2"));
    }

    #[test]
    fn test_unknown_value_rejected() {
        let module = Module::new();
        let func = function(Vec::new());
        let err = translate(&module, &func, |t| t.use_of(ValueId::new(9))).unwrap_err();
        assert!(matches!(err, Error::ValueNotFound(id) if id == ValueId::new(9)));
    }

    #[test]
    fn test_vector_extract_renders_component() {
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        let func = function(vec![def(5, vec2)]);
        let inst = Instruction::with_result(
            ValueId::new(6),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(5),
                indices: vec![1],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::ident("x_5").member("y"));
    }

    #[test]
    fn test_vector_extract_out_of_bounds() {
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        let func = function(vec![def(1, vec2)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(1),
                indices: vec![900],
            },
        );
        let err = translate(&module, &func, |t| t.rhs(&inst)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CompositeExtract %2 index value 900 is out of bounds for vector of 2 elements"
        );
    }

    #[test]
    fn test_runtime_array_extract_rejected() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        let rta = module
            .types
            .register(Type::RuntimeArray { element: f32_ty })
            .unwrap();
        let func = function(vec![def(1, rta)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(1),
                indices: vec![0],
            },
        );
        let err = translate(&module, &func, |t| t.rhs(&inst)).unwrap_err();
        assert_eq!(err.to_string(), "can't do OpCompositeExtract on a runtime array");
    }

    #[test]
    fn test_extract_folds_through_construct() {
        // x_4 = vec2(x_2, x_3); extracting component 1 yields x_3, not x_4.y.
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        let func = function(vec![
            def(2, f32_ty),
            def(3, f32_ty),
            FunctionInst::Op(Instruction::with_result(
                ValueId::new(4),
                vec2,
                Op::CompositeConstruct {
                    operands: vec![ValueId::new(2), ValueId::new(3)],
                },
            )),
        ]);
        let inst = Instruction::with_result(
            ValueId::new(5),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(4),
                indices: vec![1],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::ident("x_3"));
    }

    #[test]
    fn test_extract_folds_through_composite_constant() {
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        module.define_constant(ValueId::new(1), f32_ty, Constant::F32(1.5));
        module.define_constant(ValueId::new(2), f32_ty, Constant::F32(2.5));
        module.define_constant(
            ValueId::new(3),
            vec2,
            Constant::Composite(vec![ValueId::new(1), ValueId::new(2)]),
        );
        let func = function(Vec::new());
        let inst = Instruction::with_result(
            ValueId::new(4),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(3),
                indices: vec![0],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::Literal(Literal::F32(1.5)));
    }

    #[test]
    fn test_matrix_then_vector_extract() {
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        let mat3x2 = module
            .types
            .register(Type::Matrix { column: vec2, columns: 3 })
            .unwrap();
        let func = function(vec![def(1, mat3x2)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(1),
                indices: vec![2, 1],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::ident("x_1").index(2).member("y"));
    }

    #[test]
    fn test_matrix_extract_out_of_bounds() {
        let mut module = Module::new();
        let (f32_ty, vec2) = vec2_f32(&mut module);
        let mat3x2 = module
            .types
            .register(Type::Matrix { column: vec2, columns: 3 })
            .unwrap();
        let func = function(vec![def(1, mat3x2)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(1),
                indices: vec![3],
            },
        );
        let err = translate(&module, &func, |t| t.rhs(&inst)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CompositeExtract %2 index value 3 is out of bounds for matrix of 3 elements"
        );
    }

    #[test]
    fn test_fixed_array_extract_not_bounds_checked() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        let arr = module
            .types
            .register(Type::Array { element: f32_ty, size: 4 })
            .unwrap();
        let func = function(vec![def(1, arr)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::CompositeExtract {
                composite: ValueId::new(1),
                indices: vec![10],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::ident("x_1").index(10));
    }

    #[test]
    fn test_access_chain_struct_member() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        let u32_ty = module.types.register(Type::U32).unwrap();
        let s = module
            .types
            .register_struct(vec![(Some("age".to_string()), u32_ty), (None, f32_ty)])
            .unwrap();
        let ptr = module
            .types
            .register(Type::Pointer { pointee: s, class: StorageClass::Private })
            .unwrap();
        module.define_global(GlobalVar {
            id: ValueId::new(1),
            ty: ptr,
            class: StorageClass::Private,
            initializer: None,
        });
        module.set_debug_name(ValueId::new(1), "myvar");
        module.define_constant(ValueId::new(8), u32_ty, Constant::U32(1));
        let func = function(Vec::new());
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::AccessChain {
                base: ValueId::new(1),
                indices: vec![ValueId::new(8)],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(expr, Expression::ident("myvar").member("field1"));
    }

    #[test]
    fn test_access_chain_through_runtime_array() {
        let mut module = Module::new();
        let f32_ty = module.types.register(Type::F32).unwrap();
        let u32_ty = module.types.register(Type::U32).unwrap();
        let rta = module
            .types
            .register(Type::RuntimeArray { element: f32_ty })
            .unwrap();
        let ptr = module
            .types
            .register(Type::Pointer { pointee: rta, class: StorageClass::StorageBuffer })
            .unwrap();
        module.define_global(GlobalVar {
            id: ValueId::new(1),
            ty: ptr,
            class: StorageClass::StorageBuffer,
            initializer: None,
        });
        let func = function(vec![def(5, u32_ty)]);
        let inst = Instruction::with_result(
            ValueId::new(2),
            f32_ty,
            Op::AccessChain {
                base: ValueId::new(1),
                indices: vec![ValueId::new(5)],
            },
        );
        let expr = translate(&module, &func, |t| t.rhs(&inst)).unwrap();
        assert_eq!(
            expr,
            Expression::ArrayAccessor {
                base: Box::new(Expression::ident("x_1")),
                index: Box::new(Expression::ident("x_5")),
            }
        );
    }
}
