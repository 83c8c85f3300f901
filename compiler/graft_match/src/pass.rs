//! The visitor that drives a registry over a tree.

use graft_ir::{Ast, NodeId};
use graft_scope::ScopeTree;
use graft_traverse::{traverse, Traversal, Visitor};
use tracing::debug;

use crate::{MatchError, MatchRegistry};

pub struct MatchPass<'r> {
    registry: &'r mut MatchRegistry,
    scopes: Option<&'r mut ScopeTree>,
    prune: bool,
}

impl<'r> MatchPass<'r> {
    /// `scopes` is needed by rename actions. With `prune` the walk skips
    /// subtrees deeper than any waiting case.
    pub fn new(registry: &'r mut MatchRegistry, scopes: Option<&'r mut ScopeTree>, prune: bool) -> Self {
        MatchPass {
            registry,
            scopes,
            prune,
        }
    }
}

impl Visitor for MatchPass<'_> {
    type Error = MatchError;

    fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), MatchError> {
        let depth = tr.depth();
        for sequence in self.registry.on_enter(tr.ast(), node, depth) {
            match sequence.action() {
                Some(action) => action.apply(sequence.captured(), tr, self.scopes.as_deref_mut())?,
                None => debug!(sequence = sequence.name(), "matched"),
            }
            self.registry.complete(&sequence);
        }
        if self.prune && self.registry.should_skip(depth) {
            tr.skip();
        }
        Ok(())
    }
}

/// Walk `ast` once, advancing and firing the sequences in `registry`.
#[tracing::instrument(level = "debug", skip_all, fields(sequences = registry.active_count(), prune = prune))]
pub fn run_matches(
    ast: &mut Ast,
    registry: &mut MatchRegistry,
    scopes: Option<&mut ScopeTree>,
    prune: bool,
) -> Result<(), MatchError> {
    let mut pass = MatchPass::new(registry, scopes, prune);
    traverse(ast, &mut pass)
}
