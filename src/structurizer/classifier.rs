//! Dominance-validated classification of a flow graph into regions.
//!
//! The classifier walks the graph in declaration order, trusting the
//! producer's merge declarations for *where* structure lives and using the
//! dominator tree to check that the declarations are self-consistent. It
//! never invents structure: a branch with no declared merge must resolve
//! against the stack of enclosing exits or the walk fails.

use crate::cfg::FlowGraph;
use crate::graph::{GraphBase, NodeId, Successors};
use crate::module::{BlockId, MergeDecl, Terminator};
use crate::structurizer::{Region, SwitchCase};
use crate::{Error, Result};

/// An enclosing construct a branch target may resolve against.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Loop { merge: NodeId, cont: NodeId },
    Switch { merge: NodeId, next_case: Option<NodeId> },
}

/// How a branch target leaves the current construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The target is the current sequence's natural end.
    Stop,
    /// The target is the innermost breakable construct's merge.
    Break,
    /// The target is the nearest enclosing loop's continue target.
    Continue,
    /// The target is the next switch case's entry.
    Fallthrough,
}

/// Builds the structured region tree of one function.
pub struct RegionClassifier<'a> {
    graph: &'a FlowGraph,
    placed: Vec<bool>,
}

impl<'a> RegionClassifier<'a> {
    /// Classifies the whole graph into a region tree.
    ///
    /// The resulting tree places every reachable block exactly once; a graph
    /// whose declarations would place a block twice, or leave one unplaced,
    /// is rejected.
    ///
    /// # Errors
    /// [`Error::UnstructuredLoop`] for inconsistent loop declarations and
    /// branches that bypass an enclosing construct;
    /// [`Error::IrreducibleControlFlow`] for undeclared branching that does
    /// not resolve against the enclosing exits.
    pub fn classify(graph: &'a FlowGraph) -> Result<Region> {
        let mut classifier = RegionClassifier {
            graph,
            placed: vec![false; graph.node_count()],
        };
        let mut frames = Vec::new();
        let region = classifier.sequence(graph.entry(), None, &mut frames, None)?;
        for node in graph.nodes() {
            if !classifier.placed[node.index()] {
                let label = graph.block(node).label;
                return Err(Error::IrreducibleControlFlow {
                    block: label,
                    message: format!("block %{label} is not part of any structured construct"),
                });
            }
        }
        Ok(region)
    }

    /// Walks a straight-line chain of regions from `start` until `stop`, a
    /// terminator that ends the function, or a transfer out of the construct.
    ///
    /// `loop_body_of` suppresses loop classification for the first node, so
    /// a loop header can appear as an ordinary block at the start of its own
    /// body.
    fn sequence(
        &mut self,
        start: NodeId,
        stop: Option<NodeId>,
        frames: &mut Vec<Frame>,
        loop_body_of: Option<NodeId>,
    ) -> Result<Region> {
        let mut items = Vec::new();
        let mut cur = Some(start);
        let mut first = true;
        while let Some(node) = cur {
            if stop == Some(node) {
                break;
            }
            if self.placed[node.index()] {
                let label = self.graph.block(node).label;
                return Err(Error::IrreducibleControlFlow {
                    block: label,
                    message: format!("block %{label} is reached along multiple structural paths"),
                });
            }
            let block = self.graph.block(node);
            let suppress_loop = first && loop_body_of == Some(node);
            cur = match (&block.merge, &block.terminator) {
                (Some(MergeDecl::Loop { .. }), _) if !suppress_loop => {
                    let (region, next) = self.classify_loop(node, frames)?;
                    items.push(region);
                    Some(next)
                }
                (
                    Some(MergeDecl::Selection { merge, .. }),
                    Terminator::BranchConditional {
                        true_target,
                        false_target,
                        ..
                    },
                ) => {
                    let (region, next) =
                        self.classify_if(node, *merge, *true_target, *false_target, frames)?;
                    items.push(region);
                    Some(next)
                }
                (Some(MergeDecl::Selection { merge, .. }), Terminator::Switch { .. }) => {
                    let (region, next) = self.classify_switch(node, *merge, frames)?;
                    items.push(region);
                    Some(next)
                }
                (Some(MergeDecl::Selection { .. }), _) => {
                    return Err(Error::MalformedControlFlow {
                        block: block.label,
                        message: format!(
                            "selection merge on block %{} without a branching terminator",
                            block.label
                        ),
                    });
                }
                _ => {
                    self.placed[node.index()] = true;
                    items.push(Region::Block(node));
                    self.block_continuation(node, stop, frames)?
                }
            };
            first = false;
        }
        if items.len() == 1 {
            Ok(items.into_iter().next().unwrap_or(Region::Sequence(Vec::new())))
        } else {
            Ok(Region::Sequence(items))
        }
    }

    /// Continuation after a plain block: `None` when every path out is a
    /// transfer or function exit, the follow-on node otherwise.
    fn block_continuation(
        &self,
        node: NodeId,
        stop: Option<NodeId>,
        frames: &[Frame],
    ) -> Result<Option<NodeId>> {
        let block = self.graph.block(node);
        match &block.terminator {
            Terminator::Return { .. } | Terminator::Unreachable => Ok(None),
            Terminator::Branch { target } => {
                let t = self.node_of(*target)?;
                match self.resolve_exit(block.label, t, stop, frames)? {
                    Some(_) => Ok(None),
                    None => Ok(Some(t)),
                }
            }
            Terminator::BranchConditional {
                true_target,
                false_target,
                ..
            } => {
                let t = self.node_of(*true_target)?;
                let f = self.node_of(*false_target)?;
                let true_exit = self.resolve_exit(block.label, t, stop, frames)?;
                let false_exit = self.resolve_exit(block.label, f, stop, frames)?;
                match (true_exit, false_exit) {
                    (Some(_), Some(_)) => Ok(None),
                    (Some(_), None) => Ok(Some(f)),
                    (None, Some(_)) => Ok(Some(t)),
                    (None, None) if t == f => Ok(Some(t)),
                    (None, None) => Err(Error::IrreducibleControlFlow {
                        block: block.label,
                        message: format!(
                            "conditional branch in block %{} has no selection merge and does not resolve to an enclosing construct",
                            block.label
                        ),
                    }),
                }
            }
            Terminator::Switch { .. } => Err(Error::IrreducibleControlFlow {
                block: block.label,
                message: format!(
                    "switch in block %{} has no selection merge declaration",
                    block.label
                ),
            }),
        }
    }

    fn classify_if(
        &mut self,
        node: NodeId,
        merge: BlockId,
        true_target: BlockId,
        false_target: BlockId,
        frames: &mut Vec<Frame>,
    ) -> Result<(Region, NodeId)> {
        self.placed[node.index()] = true;
        let header_label = self.graph.block(node).label;
        let m = self.node_of(merge)?;
        let then_branch = self.if_arm(header_label, true_target, m, frames)?;
        let else_branch = self.if_arm(header_label, false_target, m, frames)?;
        Ok((
            Region::If {
                header: node,
                then_branch,
                else_branch,
            },
            m,
        ))
    }

    /// One arm of an `If`: absent when the edge targets the merge, a bare
    /// transfer when it targets an enclosing exit, a nested sequence
    /// otherwise.
    fn if_arm(
        &mut self,
        header_label: BlockId,
        target: BlockId,
        merge: NodeId,
        frames: &mut Vec<Frame>,
    ) -> Result<Option<Box<Region>>> {
        let t = self.node_of(target)?;
        if t == merge {
            return Ok(None);
        }
        if self.resolve_exit(header_label, t, None, frames)?.is_some() {
            return Ok(Some(Box::new(Region::Transfer { target: t })));
        }
        let region = self.sequence(t, Some(merge), frames, None)?;
        Ok(Some(Box::new(region)))
    }

    fn classify_switch(
        &mut self,
        node: NodeId,
        merge: BlockId,
        frames: &mut Vec<Frame>,
    ) -> Result<(Region, NodeId)> {
        self.placed[node.index()] = true;
        let m = self.node_of(merge)?;
        let Terminator::Switch { default, cases, .. } = self.graph.block(node).terminator.clone()
        else {
            return Err(Error::Translation(format!(
                "block %{} classified as switch without a switch terminator",
                self.graph.block(node).label
            )));
        };

        // Group selector values by target, keeping first-occurrence order.
        let mut arms: Vec<(BlockId, Vec<i64>, bool)> = Vec::new();
        for (value, target) in cases {
            if let Some(arm) = arms.iter_mut().find(|arm| arm.0 == target) {
                arm.1.push(value);
            } else {
                arms.push((target, vec![value], false));
            }
        }
        // The default target folds into a case arm that already names it;
        // otherwise it becomes the trailing arm.
        if let Some(arm) = arms.iter_mut().find(|arm| arm.0 == default) {
            arm.2 = true;
        } else {
            arms.push((default, Vec::new(), true));
        }

        let entries = arms
            .iter()
            .map(|arm| self.node_of(arm.0))
            .collect::<Result<Vec<_>>>()?;

        let mut cases_out = Vec::with_capacity(arms.len());
        for (i, (_, selectors, is_default)) in arms.iter().enumerate() {
            let entry = entries[i];
            let body = if entry == m {
                None
            } else {
                // Fallthrough may only land on the next arm's entry.
                let next_case = entries.get(i + 1).copied().filter(|&e| e != m);
                frames.push(Frame::Switch { merge: m, next_case });
                let result = self.sequence(entry, Some(m), frames, None);
                frames.pop();
                Some(result?)
            };
            cases_out.push(SwitchCase {
                selectors: selectors.clone(),
                default: *is_default,
                entry: (entry != m).then_some(entry),
                body,
            });
        }
        Ok((
            Region::Switch {
                header: node,
                cases: cases_out,
            },
            m,
        ))
    }

    fn classify_loop(
        &mut self,
        header: NodeId,
        frames: &mut Vec<Frame>,
    ) -> Result<(Region, NodeId)> {
        let block = self.graph.block(header);
        let label = block.label;
        let Some(MergeDecl::Loop {
            merge,
            continue_target,
            ..
        }) = block.merge
        else {
            return Err(Error::Translation(format!(
                "block %{label} classified as loop without a loop merge declaration"
            )));
        };
        let m = self.node_of(merge)?;
        let c = self.node_of(continue_target)?;
        let dom = self.graph.dominator_tree();

        if !dom.dominates(header, m) {
            return Err(Error::UnstructuredLoop {
                block: label,
                message: format!(
                    "merge block %{merge} is not dominated by loop header %{label}"
                ),
            });
        }

        // Body: dominated by the header, past neither the merge nor the
        // merge block itself.
        let mut in_body = vec![false; self.graph.node_count()];
        for n in self.graph.nodes() {
            if n != m && dom.dominates(header, n) && !dom.dominates(m, n) {
                in_body[n.index()] = true;
            }
        }
        if c != header && !in_body[c.index()] {
            return Err(Error::UnstructuredLoop {
                block: label,
                message: format!("continue target %{continue_target} lies outside the loop body"),
            });
        }
        for n in self.graph.nodes().filter(|n| in_body[n.index()]) {
            for s in self.graph.successors(n) {
                if !(in_body[s.index()] || s == m || s == c || s == header) {
                    let from = self.graph.block(n).label;
                    let to = self.graph.block(s).label;
                    return Err(Error::UnstructuredLoop {
                        block: from,
                        message: format!(
                            "branch from %{from} to %{to} leaves the loop without passing its merge block"
                        ),
                    });
                }
            }
        }

        frames.push(Frame::Loop { merge: m, cont: c });
        let body = self.sequence(header, None, frames, Some(header));
        let continuing = if c == header {
            Ok(None)
        } else {
            self.sequence(c, Some(header), frames, None)
                .map(|region| Some(Box::new(region)))
        };
        frames.pop();

        Ok((
            Region::Loop {
                header,
                body: Box::new(body?),
                continuing: continuing?,
            },
            m,
        ))
    }

    /// Resolves a branch target against the sequence end and the exit stack.
    ///
    /// `Ok(None)` means the target is a plain continuation within the
    /// current construct. Targets that name the merge or continue block of
    /// an *outer* construct cannot be expressed as a single transfer and are
    /// rejected.
    fn resolve_exit(
        &self,
        block: BlockId,
        target: NodeId,
        stop: Option<NodeId>,
        frames: &[Frame],
    ) -> Result<Option<Exit>> {
        if stop == Some(target) {
            return Ok(Some(Exit::Stop));
        }
        let mut passed_breakable = false;
        let mut passed_loop = false;
        for frame in frames.iter().rev() {
            match *frame {
                Frame::Loop { merge, cont } => {
                    if target == merge {
                        if passed_breakable {
                            return Err(self.bypass_error(block, merge));
                        }
                        return Ok(Some(Exit::Break));
                    }
                    if target == cont {
                        if passed_loop {
                            let to = self.graph.block(cont).label;
                            return Err(Error::UnstructuredLoop {
                                block,
                                message: format!(
                                    "branch from %{block} targets continue block %{to} of an outer loop"
                                ),
                            });
                        }
                        return Ok(Some(Exit::Continue));
                    }
                    passed_breakable = true;
                    passed_loop = true;
                }
                Frame::Switch { merge, next_case } => {
                    if target == merge {
                        if passed_breakable {
                            return Err(self.bypass_error(block, merge));
                        }
                        return Ok(Some(Exit::Break));
                    }
                    if next_case == Some(target) {
                        if passed_breakable {
                            let to = self.graph.block(target).label;
                            return Err(Error::UnstructuredLoop {
                                block,
                                message: format!(
                                    "branch from %{block} falls through to case block %{to} across an enclosing construct"
                                ),
                            });
                        }
                        return Ok(Some(Exit::Fallthrough));
                    }
                    passed_breakable = true;
                }
            }
        }
        Ok(None)
    }

    fn bypass_error(&self, block: BlockId, merge: NodeId) -> Error {
        let to = self.graph.block(merge).label;
        Error::UnstructuredLoop {
            block,
            message: format!(
                "branch from %{block} to merge block %{to} bypasses an enclosing construct"
            ),
        }
    }

    fn node_of(&self, label: BlockId) -> Result<NodeId> {
        self.graph
            .node_of(label)
            .ok_or_else(|| Error::Translation(format!("unresolved block label %{label}")))
    }
}
