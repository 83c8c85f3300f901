//! Rewrites fired by finished sequences.

use graft_ir::{Ast, NodeId};
use graft_scope::ScopeTree;
use graft_traverse::Traversal;
use tracing::debug;

use crate::{ActionSpec, MatchError, PatchInstruction, PatchKind, RenameInstruction};

/// A validated action.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Rename bindings reached from the captured nodes.
    Rename(Vec<RenameInstruction>),
    /// Edit the tree around the node that finished the sequence.
    Patch(Vec<PatchInstruction>),
}

impl Action {
    /// Validate `spec` for the sequence called `sequence`. Patch code must
    /// import cleanly and `REPLACE` must carry at least one node.
    pub fn from_spec(spec: ActionSpec, sequence: &str) -> Result<Self, MatchError> {
        match spec {
            ActionSpec::Rename(instructions) => Ok(Action::Rename(instructions)),
            ActionSpec::Patches(instructions) => {
                for instruction in &instructions {
                    let code = instruction.code_nodes();
                    if instruction.kind == PatchKind::Replace && code.is_empty() {
                        return Err(MatchError::EmptyReplacement {
                            name: sequence.to_owned(),
                        });
                    }
                    for node in code {
                        Ast::validate_estree(node).map_err(|source| MatchError::PatchCode {
                            name: sequence.to_owned(),
                            source,
                        })?;
                    }
                }
                Ok(Action::Patch(instructions))
            }
        }
    }

    /// Run the action at the node being visited. `captured` ends with that
    /// node.
    ///
    /// Renames need `scopes`; without it they are skipped.
    pub fn apply(
        &self,
        captured: &[NodeId],
        tr: &mut Traversal<'_>,
        scopes: Option<&mut ScopeTree>,
    ) -> Result<(), MatchError> {
        match self {
            Action::Patch(instructions) => apply_patches(instructions, tr),
            Action::Rename(instructions) => match scopes {
                Some(scopes) => apply_renames(instructions, captured, tr, scopes),
                None => {
                    debug!("no scope information, rename skipped");
                    Ok(())
                }
            },
        }
    }
}

fn apply_patches(instructions: &[PatchInstruction], tr: &mut Traversal<'_>) -> Result<(), MatchError> {
    for instruction in instructions {
        let mut nodes = Vec::new();
        if instruction.kind != PatchKind::Remove {
            for code in instruction.code_nodes() {
                nodes.push(tr.ast_mut().import(code)?);
            }
        }

        let applied = match (instruction.kind, nodes.split_first()) {
            (PatchKind::Remove, _) => tr.remove(),
            (PatchKind::Replace, Some((&first, rest))) => {
                tr.replace(first);
                rest.is_empty() || tr.insert_after(rest)
            }
            (PatchKind::Replace, None) => false,
            (PatchKind::InsertBefore, _) => tr.insert_before(&nodes),
            (PatchKind::InsertAfter, _) => tr.insert_after(&nodes),
        };
        if applied {
            debug!(kind = ?instruction.kind, nodes = nodes.len(), depth = tr.depth(), "patch applied");
        } else {
            debug!(kind = ?instruction.kind, depth = tr.depth(), "patch position unavailable, skipped");
        }
    }
    Ok(())
}

fn apply_renames(
    instructions: &[RenameInstruction],
    captured: &[NodeId],
    tr: &mut Traversal<'_>,
    scopes: &mut ScopeTree,
) -> Result<(), MatchError> {
    for RenameInstruction {
        path,
        name,
        matched_node_ref,
    } in instructions
    {
        let base = match matched_node_ref {
            Some(index) => captured.get(*index),
            None => captured.last(),
        };
        let Some(&base) = base else {
            debug!(?matched_node_ref, "no such captured node, rename skipped");
            continue;
        };
        let path = path.as_deref().map_or("", str::trim);
        let Some(target) = tr.ast().resolve_path(base, path) else {
            debug!(%path, "rename path does not resolve, skipped");
            continue;
        };
        let Some(binding) = tr.ast().get(target).binding() else {
            debug!(?target, "rename target is unbound, skipped");
            continue;
        };
        scopes.rename(tr.ast_mut(), binding, name)?;
        debug!(%name, ?binding, "renamed");
    }
    Ok(())
}
