//! The binding pass.

use std::convert::Infallible;

use graft_ir::{Ast, NodeId, NodeType};
use graft_traverse::{traverse, Traversal, Visitor};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{BindingKind, ScopeId, ScopeKind, ScopeTree};

/// Binding pass settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeOptions {
    /// Identifiers naming the host's global object. Members reached through
    /// them (`window.foo`) resolve in the global scope.
    pub host_globals: Vec<String>,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        ScopeOptions {
            host_globals: vec!["window".to_owned()],
        }
    }
}

/// Build the scope tree of `ast`, recording each identifier's binding on
/// its node.
#[tracing::instrument(level = "debug", skip_all)]
pub fn bind_scopes(ast: &mut Ast, options: &ScopeOptions) -> ScopeTree {
    let mut binder = ScopeBinder::new(ast.root(), options);
    match traverse(ast, &mut binder) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    binder.finish(ast)
}

/// Visitor maintaining the current scope while the tree is walked.
///
/// The root always gets the global scope, whatever its kind, so partial
/// trees (a lone function or expression) bind the same way a `Program` does.
pub struct ScopeBinder<'o> {
    tree: ScopeTree,
    current: ScopeId,
    options: &'o ScopeOptions,
}

/// What an identifier occurrence means, decided from where it sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Site {
    /// Introduces a binding of `kind` in `scope`.
    Declare(BindingKind, ScopeId),
    /// Refers to something. Resolved in the current scope now, or left
    /// pending and looked up outward once every declaration is known.
    Local,
    /// Refers to something in the global scope.
    Global,
    /// Not a variable at all (property keys, labels).
    NotABinding,
}

impl<'o> ScopeBinder<'o> {
    pub fn new(root: NodeId, options: &'o ScopeOptions) -> Self {
        let mut tree = ScopeTree::new();
        let current = tree.push_scope(ScopeKind::Global, None, root);
        ScopeBinder {
            tree,
            current,
            options,
        }
    }

    /// Resolve what is still pending and hand the tree over.
    pub fn finish(mut self, ast: &mut Ast) -> ScopeTree {
        self.tree.resolve_pending(ast);
        self.tree
    }

    fn classify(&self, tr: &Traversal<'_>) -> Site {
        let Some(frame) = tr.ancestor(0) else {
            return Site::Local;
        };
        let ast = tr.ast();
        let parent = ast.get(frame.parent);
        let field = frame.slot.field;
        let in_params = || tr.ancestor(1).is_some_and(|f| f.slot.field == "params");

        match (parent.ty(), field) {
            (NodeType::FunctionDeclaration, "id") => {
                let outer = self.tree.scope(self.current).parent.unwrap_or(self.current);
                Site::Declare(BindingKind::Var, outer)
            }
            (NodeType::FunctionExpression | NodeType::ArrowFunctionExpression, "id") => {
                Site::Declare(BindingKind::Id, self.current)
            }
            (ty, "params") if ty.is_function() => Site::Declare(BindingKind::Param, self.current),

            (NodeType::AssignmentPattern | NodeType::RestElement, slot) if slot != "right" => {
                let kind = if in_params() { BindingKind::Param } else { BindingKind::Var };
                Site::Declare(kind, self.current)
            }
            (NodeType::VariableDeclarator, "id") => Site::Declare(BindingKind::Var, self.current),

            (NodeType::MemberExpression, "property")
            | (NodeType::Property | NodeType::MethodDefinition, "key")
                if !parent.is_computed() =>
            {
                Site::NotABinding
            }
            (
                NodeType::LabeledStatement
                | NodeType::BreakStatement
                | NodeType::ContinueStatement
                | NodeType::MetaProperty,
                _,
            ) => Site::NotABinding,

            (NodeType::MemberExpression, _) if self.is_host_global(ast, parent.child("object")) => Site::Global,
            _ => Site::Local,
        }
    }

    /// Is `object` an identifier naming a host global?
    fn is_host_global(&self, ast: &Ast, object: Option<NodeId>) -> bool {
        object
            .and_then(|object| ast.get(object).name())
            .is_some_and(|name| self.options.host_globals.iter().any(|g| g == name))
    }

    fn bind_identifier(&mut self, node: NodeId, tr: &mut Traversal<'_>) {
        let Some(name) = tr.ast().get(node).name().map(str::to_owned) else {
            return;
        };
        let site = self.classify(tr);
        trace!(%name, ?site, depth = tr.depth(), "identifier");

        let ast = tr.ast_mut();
        match site {
            Site::Declare(BindingKind::Var, scope) => {
                self.tree.declare_var(ast, scope, &name, node);
            }
            Site::Declare(kind, scope) => {
                self.tree.declare(ast, scope, kind, &name, node);
            }
            Site::Local => {
                self.tree.reference_local(ast, self.current, &name, node);
            }
            Site::Global => {
                self.tree.reference_local(ast, ScopeId::GLOBAL, &name, node);
            }
            Site::NotABinding => {}
        }
    }
}

impl Visitor for ScopeBinder<'_> {
    type Error = Infallible;

    fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Infallible> {
        let ty = tr.ast().ty(node);
        if ty.is_function() {
            self.current = self
                .tree
                .push_scope(ScopeKind::Function, Some(self.current), node);
        } else if ty == NodeType::Identifier {
            self.bind_identifier(node, tr);
        }
        Ok(())
    }

    fn exit(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Infallible> {
        if tr.ast().ty(node).is_function() && self.tree.scope(self.current).node == node {
            if let Some(parent) = self.tree.scope(self.current).parent {
                self.current = parent;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
