//! Grouping a raw instruction stream into a [`FlowGraph`].
//!
//! The builder performs the first two validation layers: stream grouping
//! (every block is a label, instructions, an optional merge declaration,
//! and a terminator) and edge resolution (every branch target names a block,
//! every block is reachable from the entry). Structural validation against
//! dominance happens later in [`crate::structurizer`].

use std::collections::HashMap;

use crate::cfg::{BasicBlock, CfgEdgeKind, FlowGraph};
use crate::graph::{DirectedGraph, GraphBase, NodeId, Successors};
use crate::module::{BlockId, Function, FunctionInst, MergeDecl, Terminator};
use crate::{Error, Result};

/// Builds the control-flow graph of a function from its raw stream.
///
/// # Errors
/// - [`Error::EmptyFunction`] when the stream declares no blocks.
/// - [`Error::MalformedControlFlow`] for grouping defects (instructions
///   before the first label, a block without a terminator, duplicate labels,
///   a merge declaration separated from its terminator), dangling branch or
///   merge targets, duplicate switch selector values, and unreachable
///   blocks.
pub fn build_flow_graph(function: &Function) -> Result<FlowGraph> {
    let blocks = group_blocks(&function.body)?;

    let mut graph: DirectedGraph<BasicBlock, CfgEdgeKind> = DirectedGraph::new();
    let mut by_label: HashMap<BlockId, NodeId> = HashMap::new();
    for block in blocks {
        let label = block.label;
        let node = graph.add_node(block);
        if by_label.insert(label, node).is_some() {
            return Err(Error::MalformedControlFlow {
                block: label,
                message: format!("duplicate block label %{label}"),
            });
        }
    }

    let entry = NodeId::new(0);
    for node in graph.node_ids().collect::<Vec<_>>() {
        let block = graph.node(node).clone();
        let resolve = |target: BlockId| -> Result<NodeId> {
            by_label.get(&target).copied().ok_or_else(|| Error::MalformedControlFlow {
                block: block.label,
                message: format!("branch target %{target} does not name a block"),
            })
        };

        if let Some(merge) = &block.merge {
            // Merge and continue targets must name blocks even though they
            // are declarations, not edges.
            resolve(merge.merge())?;
            if let MergeDecl::Loop { continue_target, .. } = merge {
                resolve(*continue_target)?;
            }
        }

        match &block.terminator {
            Terminator::Return { .. } | Terminator::Unreachable => {}
            Terminator::Branch { target } => {
                let to = resolve(*target)?;
                graph.add_edge(node, to, CfgEdgeKind::Unconditional);
            }
            Terminator::BranchConditional {
                true_target,
                false_target,
                ..
            } => {
                let t = resolve(*true_target)?;
                let f = resolve(*false_target)?;
                graph.add_edge(node, t, CfgEdgeKind::ConditionalTrue);
                graph.add_edge(node, f, CfgEdgeKind::ConditionalFalse);
            }
            Terminator::Switch { default, cases, .. } => {
                let mut seen = std::collections::HashSet::new();
                for &(value, target) in cases {
                    if !seen.insert(value) {
                        return Err(Error::MalformedControlFlow {
                            block: block.label,
                            message: format!("duplicate switch selector value {value}"),
                        });
                    }
                    let to = resolve(target)?;
                    graph.add_edge(node, to, CfgEdgeKind::case(value));
                }
                let to = resolve(*default)?;
                graph.add_edge(node, to, CfgEdgeKind::default_case());
            }
        }
    }

    check_reachability(&graph, entry)?;
    Ok(FlowGraph::new(graph, entry, by_label))
}

/// Splits the flat stream at labels and terminators.
fn group_blocks(stream: &[FunctionInst]) -> Result<Vec<BasicBlock>> {
    struct Pending {
        label: BlockId,
        instructions: Vec<crate::module::Instruction>,
        merge: Option<MergeDecl>,
    }

    let mut blocks = Vec::new();
    let mut current: Option<Pending> = None;

    for inst in stream {
        match inst {
            FunctionInst::Label(label) => {
                if let Some(open) = &current {
                    return Err(Error::MalformedControlFlow {
                        block: open.label,
                        message: format!("block %{} has no terminator", open.label),
                    });
                }
                current = Some(Pending {
                    label: *label,
                    instructions: Vec::new(),
                    merge: None,
                });
            }
            FunctionInst::Op(op) => {
                let Some(open) = current.as_mut() else {
                    return Err(stray_before_label(stream));
                };
                if open.merge.is_some() {
                    return Err(Error::MalformedControlFlow {
                        block: open.label,
                        message: "merge declaration does not immediately precede the terminator"
                            .to_string(),
                    });
                }
                open.instructions.push(op.clone());
            }
            FunctionInst::Merge(decl) => {
                let Some(open) = current.as_mut() else {
                    return Err(stray_before_label(stream));
                };
                if open.merge.replace(*decl).is_some() {
                    return Err(Error::MalformedControlFlow {
                        block: open.label,
                        message: "multiple merge declarations in one block".to_string(),
                    });
                }
            }
            FunctionInst::Terminator(terminator) => {
                let Some(open) = current.take() else {
                    return Err(stray_before_label(stream));
                };
                blocks.push(BasicBlock {
                    label: open.label,
                    instructions: open.instructions,
                    merge: open.merge,
                    terminator: terminator.clone(),
                    position: blocks.len(),
                });
            }
        }
    }

    if let Some(open) = current {
        return Err(Error::MalformedControlFlow {
            block: open.label,
            message: format!("block %{} has no terminator", open.label),
        });
    }
    if blocks.is_empty() {
        return Err(Error::EmptyFunction);
    }
    Ok(blocks)
}

/// Error for stream content before the first label. Reported against the
/// first label in the stream when one exists at all.
fn stray_before_label(stream: &[FunctionInst]) -> Error {
    let first_label = stream.iter().find_map(|inst| match inst {
        FunctionInst::Label(label) => Some(*label),
        _ => None,
    });
    match first_label {
        Some(block) => Error::MalformedControlFlow {
            block,
            message: "instructions precede the first block label".to_string(),
        },
        None => Error::EmptyFunction,
    }
}

fn check_reachability(
    graph: &DirectedGraph<BasicBlock, CfgEdgeKind>,
    entry: NodeId,
) -> Result<()> {
    let mut visited = vec![false; graph.node_count()];
    let mut stack = vec![entry];
    visited[entry.index()] = true;
    while let Some(node) = stack.pop() {
        for succ in graph.successors(node) {
            if !visited[succ.index()] {
                visited[succ.index()] = true;
                stack.push(succ);
            }
        }
    }
    for node in graph.node_ids() {
        if !visited[node.index()] {
            let label = graph.node(node).label;
            return Err(Error::MalformedControlFlow {
                block: label,
                message: format!("block %{label} is unreachable"),
            });
        }
    }
    Ok(())
}
