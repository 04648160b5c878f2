#![allow(unused)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use spvscope::prelude::*;

const COND: u32 = 1;
const HALF: u32 = 2;
const ONE_POINT_FIVE: u32 = 3;

/// A module of `count` identical functions, each with a guarded loop, a
/// local variable round trip, and a composite construct/extract pair.
fn sample_module(count: u32) -> Module {
    let mut module = Module::new();
    let void = module.types.register(Type::Void).unwrap();
    let bool_ty = module.types.register(Type::Bool).unwrap();
    let f32_ty = module.types.register(Type::F32).unwrap();
    let vec2 = module
        .types
        .register(Type::Vector { element: f32_ty, size: 2 })
        .unwrap();
    let f32_ptr = module
        .types
        .register(Type::Pointer { pointee: f32_ty, class: StorageClass::Function })
        .unwrap();
    module.define_constant(ValueId::new(COND), bool_ty, Constant::Bool(true));
    module.define_constant(ValueId::new(HALF), f32_ty, Constant::F32(0.5));
    module.define_constant(ValueId::new(ONE_POINT_FIVE), f32_ty, Constant::F32(1.5));

    for i in 0..count {
        module.add_function(Function {
            id: ValueId::new(100 + i),
            name: None,
            return_type: void,
            control: FunctionControl::empty(),
            params: Vec::new(),
            body: vec![
                FunctionInst::Label(BlockId::new(1)),
                FunctionInst::Merge(MergeDecl::Loop {
                    merge: BlockId::new(4),
                    continue_target: BlockId::new(3),
                    control: LoopControl::empty(),
                }),
                FunctionInst::Terminator(Terminator::BranchConditional {
                    condition: ValueId::new(COND),
                    true_target: BlockId::new(2),
                    false_target: BlockId::new(4),
                }),
                FunctionInst::Label(BlockId::new(2)),
                FunctionInst::Op(Instruction::with_result(
                    ValueId::new(10),
                    f32_ptr,
                    Op::Variable { class: StorageClass::Function, initializer: None },
                )),
                FunctionInst::Op(Instruction::effect(Op::Store {
                    pointer: ValueId::new(10),
                    value: ValueId::new(HALF),
                })),
                FunctionInst::Op(Instruction::with_result(
                    ValueId::new(11),
                    f32_ty,
                    Op::Load { pointer: ValueId::new(10) },
                )),
                FunctionInst::Op(Instruction::with_result(
                    ValueId::new(12),
                    vec2,
                    Op::CompositeConstruct {
                        operands: vec![ValueId::new(11), ValueId::new(ONE_POINT_FIVE)],
                    },
                )),
                FunctionInst::Op(Instruction::with_result(
                    ValueId::new(13),
                    f32_ty,
                    Op::CompositeExtract {
                        composite: ValueId::new(12),
                        indices: vec![1],
                    },
                )),
                FunctionInst::Terminator(Terminator::Branch { target: BlockId::new(3) }),
                FunctionInst::Label(BlockId::new(3)),
                FunctionInst::Terminator(Terminator::Branch { target: BlockId::new(1) }),
                FunctionInst::Label(BlockId::new(4)),
                FunctionInst::Terminator(Terminator::Return { value: None }),
            ],
        });
    }
    module
}

/// Benchmark single-function emission through the full pipeline
fn bench_emit_function(c: &mut Criterion) {
    let module = sample_module(1);
    let function = &module.functions()[0];

    let mut group = c.benchmark_group("emit");
    group.bench_function("emit_function", |b| {
        b.iter(|| black_box(emit_function(black_box(&module), black_box(function)).unwrap()));
    });
    group.finish();
}

/// Benchmark whole-module parallel translation
fn bench_translate_module(c: &mut Criterion) {
    const FUNCTIONS: u32 = 256;
    let module = sample_module(FUNCTIONS);

    let mut group = c.benchmark_group("translate");
    group.throughput(Throughput::Elements(u64::from(FUNCTIONS)));
    group.bench_function("translate_module", |b| {
        b.iter(|| black_box(translate_module(black_box(&module)).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_emit_function, bench_translate_module);
criterion_main!(benches);
