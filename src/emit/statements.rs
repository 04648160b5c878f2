//! Statement synthesis over the region tree.
//!
//! The synthesizer walks a classified [`Region`] tree carrying a stack of
//! enclosing exits and renders each block's instructions followed by
//! whatever its terminator means *in that context*: nothing for the natural
//! continuation, `break`/`continue`/`fallthrough` for edges into the exit
//! stack, and a guard `if` around the transfer when only one side of an
//! undeclared conditional leaves the construct.

use crate::ast::{Statement, SwitchArm};
use crate::cfg::FlowGraph;
use crate::emit::ExpressionTranslator;
use crate::graph::NodeId;
use crate::module::{BlockId, MergeDecl, Op, Terminator, Type};
use crate::structurizer::Region;
use crate::{Error, Result};

/// An enclosing exit a branch target may render against.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Loop { merge: BlockId, cont: BlockId },
    Switch { merge: BlockId, next_case: Option<BlockId> },
}

/// Renders a region tree into statements.
pub struct StatementSynthesizer<'a> {
    graph: &'a FlowGraph,
    exprs: &'a ExpressionTranslator<'a>,
}

impl<'a> StatementSynthesizer<'a> {
    /// Creates a synthesizer over one function's graph and translator.
    #[must_use]
    pub fn new(graph: &'a FlowGraph, exprs: &'a ExpressionTranslator<'a>) -> Self {
        Self { graph, exprs }
    }

    /// Renders the whole region tree.
    pub fn synthesize(&self, region: &Region) -> Result<Vec<Statement>> {
        let mut out = Vec::new();
        let mut frames = Vec::new();
        self.region(region, &mut frames, &mut out)?;
        Ok(out)
    }

    fn region(
        &self,
        region: &Region,
        frames: &mut Vec<Frame>,
        out: &mut Vec<Statement>,
    ) -> Result<()> {
        match region {
            Region::Block(node) => {
                self.instructions(*node, out)?;
                self.terminator(*node, frames, out)
            }
            Region::Sequence(items) => {
                for item in items {
                    self.region(item, frames, out)?;
                }
                Ok(())
            }
            Region::If {
                header,
                then_branch,
                else_branch,
            } => {
                self.instructions(*header, out)?;
                let block = self.graph.block(*header);
                let Terminator::BranchConditional { condition, .. } = &block.terminator else {
                    return Err(Error::Translation(format!(
                        "if region at block %{} without a conditional terminator",
                        block.label
                    )));
                };
                let condition = self.exprs.use_of(*condition)?;
                let then_body = self.optional_arm(then_branch.as_deref(), frames)?;
                let else_body = self.optional_arm(else_branch.as_deref(), frames)?;
                // An if with only a false branch renders as a negated
                // condition instead of an empty then-branch.
                let stmt = if then_body.is_empty() && !else_body.is_empty() {
                    Statement::If {
                        condition: condition.negate(),
                        then_body: else_body,
                        else_body: Vec::new(),
                    }
                } else {
                    Statement::If {
                        condition,
                        then_body,
                        else_body,
                    }
                };
                out.push(stmt);
                Ok(())
            }
            Region::Loop {
                header,
                body,
                continuing,
            } => {
                let block = self.graph.block(*header);
                let Some(MergeDecl::Loop {
                    merge,
                    continue_target,
                    ..
                }) = block.merge
                else {
                    return Err(Error::Translation(format!(
                        "loop region at block %{} without a loop merge declaration",
                        block.label
                    )));
                };
                frames.push(Frame::Loop {
                    merge,
                    cont: continue_target,
                });
                let body_result = self.nested(body, frames);
                let continuing_result = match continuing {
                    Some(region) => self.nested(region, frames),
                    None => Ok(Vec::new()),
                };
                frames.pop();
                out.push(Statement::Loop {
                    body: body_result?,
                    continuing: continuing_result?,
                });
                Ok(())
            }
            Region::Switch { header, cases } => {
                self.instructions(*header, out)?;
                let block = self.graph.block(*header);
                let Some(MergeDecl::Selection { merge, .. }) = block.merge else {
                    return Err(Error::Translation(format!(
                        "switch region at block %{} without a selection merge declaration",
                        block.label
                    )));
                };
                let Terminator::Switch { selector, .. } = &block.terminator else {
                    return Err(Error::Translation(format!(
                        "switch region at block %{} without a switch terminator",
                        block.label
                    )));
                };
                let selector = self.exprs.use_of(*selector)?;
                let mut arms = Vec::with_capacity(cases.len());
                for (i, case) in cases.iter().enumerate() {
                    let next_case = cases
                        .get(i + 1)
                        .and_then(|next| next.entry)
                        .map(|entry| self.graph.block(entry).label);
                    let body = match &case.body {
                        Some(region) => {
                            frames.push(Frame::Switch { merge, next_case });
                            let result = self.nested(region, frames);
                            frames.pop();
                            result?
                        }
                        None => Vec::new(),
                    };
                    arms.push(SwitchArm {
                        selectors: case.selectors.clone(),
                        default: case.default,
                        body,
                    });
                }
                out.push(Statement::Switch { selector, arms });
                Ok(())
            }
            Region::Transfer { target } => {
                let label = self.graph.block(*target).label;
                match self.transfer(label, frames) {
                    Some(stmt) => {
                        out.push(stmt);
                        Ok(())
                    }
                    None => Err(Error::Translation(format!(
                        "transfer to block %{label} does not resolve to an enclosing construct"
                    ))),
                }
            }
        }
    }

    fn nested(&self, region: &Region, frames: &mut Vec<Frame>) -> Result<Vec<Statement>> {
        let mut out = Vec::new();
        self.region(region, frames, &mut out)?;
        Ok(out)
    }

    fn optional_arm(
        &self,
        region: Option<&Region>,
        frames: &mut Vec<Frame>,
    ) -> Result<Vec<Statement>> {
        match region {
            Some(region) => self.nested(region, frames),
            None => Ok(Vec::new()),
        }
    }

    /// Renders a block's value instructions.
    fn instructions(&self, node: NodeId, out: &mut Vec<Statement>) -> Result<()> {
        let block = self.graph.block(node);
        for inst in &block.instructions {
            match &inst.op {
                Op::Variable { initializer, .. } => {
                    let result = inst.result.ok_or_else(|| {
                        Error::Translation("Variable without a result id".to_string())
                    })?;
                    let ptr_ty = inst.result_type.ok_or_else(|| {
                        Error::Translation(format!("variable %{result} has no declared type"))
                    })?;
                    let Type::Pointer { pointee, .. } = self.exprs.module().types.lookup(ptr_ty)?
                    else {
                        return Err(Error::Translation(format!(
                            "variable %{result} does not have a pointer type"
                        )));
                    };
                    let initializer = match initializer {
                        Some(init) => Some(self.exprs.use_of(*init)?),
                        None => None,
                    };
                    out.push(Statement::VariableDecl {
                        name: self.exprs.symbols().name(result),
                        ty: Some(*pointee),
                        initializer,
                        mutable: true,
                    });
                }
                Op::Store { pointer, value } => {
                    out.push(Statement::Assign {
                        target: self.exprs.place_of(*pointer)?,
                        value: self.exprs.use_of(*value)?,
                    });
                }
                Op::Barrier => out.push(Statement::Barrier),
                // Access chains are inlined at their load/store sites.
                Op::AccessChain { .. } => {}
                _ => {
                    let result = inst.result.ok_or_else(|| {
                        Error::Translation(format!("{} without a result id", inst.op))
                    })?;
                    let ty = inst.result_type.ok_or_else(|| {
                        Error::Translation(format!("value %{result} has no declared type"))
                    })?;
                    out.push(Statement::binding(
                        self.exprs.symbols().name(result),
                        ty,
                        self.exprs.rhs(inst)?,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Renders a block's terminator against the exit stack.
    fn terminator(
        &self,
        node: NodeId,
        frames: &[Frame],
        out: &mut Vec<Statement>,
    ) -> Result<()> {
        let block = self.graph.block(node);
        match &block.terminator {
            Terminator::Return { value } => {
                let value = match value {
                    Some(v) => Some(self.exprs.use_of(*v)?),
                    None => None,
                };
                out.push(Statement::Return { value });
                Ok(())
            }
            Terminator::Unreachable => Ok(()),
            Terminator::Branch { target } => {
                if let Some(stmt) = self.transfer(*target, frames) {
                    out.push(stmt);
                }
                Ok(())
            }
            Terminator::BranchConditional {
                condition,
                true_target,
                false_target,
            } => {
                let true_stmt = self.transfer(*true_target, frames);
                let false_stmt = self.transfer(*false_target, frames);
                let condition = self.exprs.use_of(*condition)?;
                match (true_stmt, false_stmt) {
                    (None, None) => Ok(()),
                    (Some(t), None) => {
                        out.push(Statement::If {
                            condition,
                            then_body: vec![t],
                            else_body: Vec::new(),
                        });
                        Ok(())
                    }
                    (None, Some(f)) => {
                        // Only the false edge transfers: negate rather than
                        // emit an empty then-branch.
                        out.push(Statement::If {
                            condition: condition.negate(),
                            then_body: vec![f],
                            else_body: Vec::new(),
                        });
                        Ok(())
                    }
                    (Some(t), Some(f)) => {
                        out.push(Statement::If {
                            condition,
                            then_body: vec![t],
                            else_body: vec![f],
                        });
                        Ok(())
                    }
                }
            }
            Terminator::Switch { .. } => Err(Error::Translation(format!(
                "switch terminator in block %{} outside a switch region",
                block.label
            ))),
        }
    }

    /// The statement a branch to `target` means under the current exits:
    /// `None` when the edge is the natural continuation.
    fn transfer(&self, target: BlockId, frames: &[Frame]) -> Option<Statement> {
        let mut passed_breakable = false;
        let mut passed_loop = false;
        for frame in frames.iter().rev() {
            match *frame {
                Frame::Loop { merge, cont } => {
                    if target == merge && !passed_breakable {
                        return Some(Statement::Break);
                    }
                    if target == cont && !passed_loop {
                        return Some(Statement::Continue);
                    }
                    passed_breakable = true;
                    passed_loop = true;
                }
                Frame::Switch { merge, next_case } => {
                    if target == merge && !passed_breakable {
                        return Some(Statement::Break);
                    }
                    if next_case == Some(target) && !passed_breakable {
                        return Some(Statement::Fallthrough);
                    }
                    passed_breakable = true;
                }
            }
        }
        None
    }
}
