//! End-to-end control-flow tests: declared conditionals, loops, and
//! switches structured into statement trees, plus rejection of graphs the
//! declarations cannot explain.

use spvscope::prelude::*;

/// Condition constant inlined as `true` at every use.
const COND: u32 = 90;
/// Selector constant for switch tests.
const SELECTOR: u32 = 91;
/// Second condition constant, inlined as `false`.
const COND2: u32 = 92;

fn fixture() -> Module {
    let mut module = Module::new();
    let bool_ty = module.types.register(Type::Bool).unwrap();
    let i32_ty = module.types.register(Type::I32).unwrap();
    module.define_constant(ValueId::new(COND), bool_ty, Constant::Bool(true));
    module.define_constant(ValueId::new(COND2), bool_ty, Constant::Bool(false));
    module.define_constant(ValueId::new(SELECTOR), i32_ty, Constant::I32(3));
    module
}

fn emit(module: &Module, body: Vec<FunctionInst>) -> Result<StructuredFunction> {
    let mut module = module.clone();
    let void = module.types.register(Type::Void)?;
    let function = Function {
        id: ValueId::new(100),
        name: None,
        return_type: void,
        control: FunctionControl::empty(),
        params: Vec::new(),
        body,
    };
    emit_function(&module, &function)
}

fn label(n: u32) -> FunctionInst {
    FunctionInst::Label(BlockId::new(n))
}

fn branch(n: u32) -> FunctionInst {
    FunctionInst::Terminator(Terminator::Branch { target: BlockId::new(n) })
}

fn ret() -> FunctionInst {
    FunctionInst::Terminator(Terminator::Return { value: None })
}

fn cond(c: u32, t: u32, f: u32) -> FunctionInst {
    FunctionInst::Terminator(Terminator::BranchConditional {
        condition: ValueId::new(c),
        true_target: BlockId::new(t),
        false_target: BlockId::new(f),
    })
}

fn sel_merge(m: u32) -> FunctionInst {
    FunctionInst::Merge(MergeDecl::Selection {
        merge: BlockId::new(m),
        control: SelectionControl::empty(),
    })
}

fn loop_merge(m: u32, c: u32) -> FunctionInst {
    FunctionInst::Merge(MergeDecl::Loop {
        merge: BlockId::new(m),
        continue_target: BlockId::new(c),
        control: LoopControl::empty(),
    })
}

fn barrier() -> FunctionInst {
    FunctionInst::Op(Instruction::effect(Op::Barrier))
}

fn lit_true() -> Expression {
    Expression::Literal(Literal::Bool(true))
}

#[test]
fn straight_line_blocks_concatenate() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            barrier(),
            branch(2),
            label(2),
            barrier(),
            branch(3),
            label(3),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![Statement::Barrier, Statement::Barrier, Statement::Return { value: None }]
    );
}

#[test]
fn declared_conditional_renders_both_arms() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            sel_merge(4),
            cond(COND, 2, 3),
            label(2),
            barrier(),
            branch(4),
            label(3),
            barrier(),
            barrier(),
            branch(4),
            label(4),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::If {
                condition: lit_true(),
                then_body: vec![Statement::Barrier],
                else_body: vec![Statement::Barrier, Statement::Barrier],
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn conditional_with_only_false_arm_negates() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            sel_merge(3),
            cond(COND, 3, 2),
            label(2),
            barrier(),
            branch(3),
            label(3),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::If {
                condition: lit_true().negate(),
                then_body: vec![Statement::Barrier],
                else_body: Vec::new(),
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn while_loop_renders_guarded_break_and_continuing() {
    // 1 is the header: stay in the loop while the condition holds, run the
    // continuing block before each back edge.
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            loop_merge(4, 3),
            cond(COND, 2, 4),
            label(2),
            barrier(),
            branch(3),
            label(3),
            barrier(),
            branch(1),
            label(4),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::Loop {
                body: vec![
                    Statement::If {
                        condition: lit_true().negate(),
                        then_body: vec![Statement::Break],
                        else_body: Vec::new(),
                    },
                    Statement::Barrier,
                    Statement::Continue,
                ],
                continuing: vec![Statement::Barrier],
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn self_continuing_loop_has_no_continuing_block() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            loop_merge(3, 1),
            cond(COND, 2, 3),
            label(2),
            barrier(),
            branch(1),
            label(3),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::Loop {
                body: vec![
                    Statement::If {
                        condition: lit_true().negate(),
                        then_body: vec![Statement::Break],
                        else_body: Vec::new(),
                    },
                    Statement::Barrier,
                    Statement::Continue,
                ],
                continuing: Vec::new(),
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn switch_renders_fallthrough_break_and_empty_default() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            sel_merge(5),
            FunctionInst::Terminator(Terminator::Switch {
                selector: ValueId::new(SELECTOR),
                default: BlockId::new(5),
                cases: vec![(1, BlockId::new(2)), (2, BlockId::new(3))],
            }),
            label(2),
            barrier(),
            branch(3),
            label(3),
            barrier(),
            branch(5),
            label(5),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::Switch {
                selector: Expression::Literal(Literal::I32(3)),
                arms: vec![
                    SwitchArm {
                        selectors: vec![1],
                        default: false,
                        body: vec![Statement::Barrier, Statement::Fallthrough],
                    },
                    SwitchArm {
                        selectors: vec![2],
                        default: false,
                        body: vec![Statement::Barrier, Statement::Break],
                    },
                    SwitchArm {
                        selectors: Vec::new(),
                        default: true,
                        body: Vec::new(),
                    },
                ],
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn declared_conditional_break_inside_loop() {
    // A selection whose then-edge jumps straight to the loop merge renders
    // as `if (...) { break; }`.
    let module = fixture();
    let emitted = emit(
        &module,
        vec![
            label(1),
            loop_merge(5, 1),
            cond(COND, 2, 5),
            label(2),
            sel_merge(3),
            cond(COND2, 5, 3),
            label(3),
            barrier(),
            branch(1),
            label(5),
            ret(),
        ],
    )
    .unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::Loop {
                body: vec![
                    Statement::If {
                        condition: lit_true().negate(),
                        then_body: vec![Statement::Break],
                        else_body: Vec::new(),
                    },
                    Statement::If {
                        condition: Expression::Literal(Literal::Bool(false)),
                        then_body: vec![Statement::Break],
                        else_body: Vec::new(),
                    },
                    Statement::Barrier,
                    Statement::Continue,
                ],
                continuing: Vec::new(),
            },
            Statement::Return { value: None },
        ]
    );
}

#[test]
fn unreachable_terminator_emits_nothing() {
    let module = fixture();
    let emitted = emit(
        &module,
        vec![label(1), barrier(), FunctionInst::Terminator(Terminator::Unreachable)],
    )
    .unwrap();
    assert_eq!(emitted.body, vec![Statement::Barrier]);
}

#[test]
fn unreachable_block_rejected() {
    let module = fixture();
    let err = emit(&module, vec![label(1), ret(), label(2), ret()]).unwrap_err();
    assert_eq!(err.to_string(), "block %2 is unreachable");
}

#[test]
fn undeclared_diamond_rejected() {
    let module = fixture();
    let err = emit(
        &module,
        vec![
            label(1),
            cond(COND, 2, 3),
            label(2),
            branch(4),
            label(3),
            branch(4),
            label(4),
            ret(),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "conditional branch in block %1 has no selection merge and does not resolve to an enclosing construct"
    );
}

#[test]
fn variables_loads_and_stores_round_through_statements() {
    let mut module = fixture();
    let f32_ty = module.types.register(Type::F32).unwrap();
    let ptr = module
        .types
        .register(Type::Pointer { pointee: f32_ty, class: StorageClass::Function })
        .unwrap();
    module.define_constant(ValueId::new(9), f32_ty, Constant::F32(0.5));
    let function = Function {
        id: ValueId::new(100),
        name: None,
        return_type: f32_ty,
        control: FunctionControl::empty(),
        params: Vec::new(),
        body: vec![
            label(1),
            FunctionInst::Op(Instruction::with_result(
                ValueId::new(10),
                ptr,
                Op::Variable { class: StorageClass::Function, initializer: None },
            )),
            FunctionInst::Op(Instruction::effect(Op::Store {
                pointer: ValueId::new(10),
                value: ValueId::new(9),
            })),
            FunctionInst::Op(Instruction::with_result(
                ValueId::new(11),
                f32_ty,
                Op::Load { pointer: ValueId::new(10) },
            )),
            FunctionInst::Terminator(Terminator::Return { value: Some(ValueId::new(11)) }),
        ],
    };
    let emitted = emit_function(&module, &function).unwrap();
    assert_eq!(
        emitted.body,
        vec![
            Statement::VariableDecl {
                name: "x_10".to_string(),
                ty: Some(f32_ty),
                initializer: None,
                mutable: true,
            },
            Statement::Assign {
                target: Expression::ident("x_10"),
                value: Expression::Literal(Literal::F32(0.5)),
            },
            Statement::binding("x_11", f32_ty, Expression::ident("x_10")),
            Statement::Return { value: Some(Expression::ident("x_11")) },
        ]
    );
}
