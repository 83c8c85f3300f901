//! Scope and binding storage.
//!
//! Scopes and bindings are both stored in flat vectors inside [`ScopeTree`]
//! and linked by index. Nodes point at their binding through
//! [`Node::binding`](graft_ir::Node::binding); bindings point back at every
//! referencing node.

use std::fmt;
use std::mem;

use graft_ir::{Ast, BindingId, NodeId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ScopeError;

/// Unique identifier for a scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The global scope. Always the first scope created.
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    pub fn new(id: u32) -> Self {
        ScopeId(id)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::GLOBAL {
            write!(f, "ScopeId::GLOBAL")
        } else {
            write!(f, "ScopeId({})", self.0)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Function,
}

/// How a name was introduced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Function parameter.
    Param,
    /// `var` or function declaration, or an implicit global.
    Var,
    /// Own name of a function or arrow expression.
    Id,
    /// Referenced but not yet resolved. None survive a completed binding
    /// pass.
    Undef,
}

/// One named entity and every node that refers to it.
#[derive(Clone, Debug)]
pub struct Binding {
    pub kind: BindingKind,
    pub name: String,
    pub scope: ScopeId,
    pub references: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// The `Program` or function node that opened the scope.
    pub node: NodeId,
    pub params: FxHashMap<String, BindingId>,
    pub vars: FxHashMap<String, BindingId>,
    pub id: Option<BindingId>,
    pub undef: FxHashMap<String, BindingId>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>, node: NodeId) -> Self {
        Scope {
            kind,
            parent,
            node,
            params: FxHashMap::default(),
            vars: FxHashMap::default(),
            id: None,
            undef: FxHashMap::default(),
        }
    }

    fn map_mut(&mut self, kind: BindingKind) -> Option<&mut FxHashMap<String, BindingId>> {
        match kind {
            BindingKind::Param => Some(&mut self.params),
            BindingKind::Var => Some(&mut self.vars),
            BindingKind::Undef => Some(&mut self.undef),
            BindingKind::Id => None,
        }
    }
}

/// Every scope and binding of one tree.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree::default()
    }

    /// Open a scope. The first scope opened is [`ScopeId::GLOBAL`].
    pub fn push_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>, node: NodeId) -> ScopeId {
        let id = ScopeId::new(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope::new(kind, parent, node));
        id
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// All scopes in creation order.
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> + '_ {
        (0u32..)
            .zip(&self.scopes)
            .map(|(i, scope)| (ScopeId::new(i), scope))
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.index())
    }

    #[inline]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Binding the node was resolved to.
    #[inline]
    pub fn binding_of(&self, ast: &Ast, node: NodeId) -> Option<&Binding> {
        ast.get(node).binding().and_then(|id| self.binding(id))
    }

    /// Binding for `name` declared directly in `scope`: `var`, then `param`,
    /// then the scope's own `id`.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let data = self.scope(scope);
        data.vars
            .get(name)
            .or_else(|| data.params.get(name))
            .copied()
            .or_else(|| data.id.filter(|&id| self.bindings[id.index()].name == name))
    }

    /// Nearest binding for `name` from `scope` outward.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        self.chain(scope).find_map(|s| self.lookup_local(s, name))
    }

    /// `scope` and its ancestors, innermost first.
    pub fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |&s| self.scope(s).parent)
    }

    /// Record `node` as a reference to `binding`.
    pub fn attach(&mut self, ast: &mut Ast, binding: BindingId, node: NodeId) {
        self.bindings[binding.index()].references.push(node);
        ast.get_mut(node).set_binding(Some(binding));
    }

    /// Get or create the `kind` binding for `name` in `scope` and attach
    /// `node` to it.
    pub fn declare(
        &mut self,
        ast: &mut Ast,
        scope: ScopeId,
        kind: BindingKind,
        name: &str,
        node: NodeId,
    ) -> BindingId {
        let existing = match kind {
            BindingKind::Id => self.scope(scope).id,
            _ => self
                .scopes[scope.index()]
                .map_mut(kind)
                .and_then(|map| map.get(name).copied()),
        };
        let binding = existing.unwrap_or_else(|| self.new_binding(scope, kind, name));
        self.attach(ast, binding, node);
        binding
    }

    /// Declare a `var`, reusing a same-named parameter of `scope` if there
    /// is one.
    pub fn declare_var(&mut self, ast: &mut Ast, scope: ScopeId, name: &str, node: NodeId) -> BindingId {
        let data = self.scope(scope);
        if !data.vars.contains_key(name) {
            if let Some(&param) = data.params.get(name) {
                self.attach(ast, param, node);
                return param;
            }
        }
        self.declare(ast, scope, BindingKind::Var, name, node)
    }

    /// Attach `node` to whatever `name` means in `scope` itself, or park it
    /// as pending until the walk ends.
    pub fn reference_local(&mut self, ast: &mut Ast, scope: ScopeId, name: &str, node: NodeId) -> BindingId {
        match self.lookup_local(scope, name) {
            Some(binding) => {
                self.attach(ast, binding, node);
                binding
            }
            None => self.declare(ast, scope, BindingKind::Undef, name, node),
        }
    }

    fn new_binding(&mut self, scope: ScopeId, kind: BindingKind, name: &str) -> BindingId {
        let id = BindingId::new(u32::try_from(self.bindings.len()).unwrap_or(u32::MAX));
        self.bindings.push(Binding {
            kind,
            name: name.to_owned(),
            scope,
            references: Vec::new(),
        });
        match kind {
            BindingKind::Id => self.scopes[scope.index()].id = Some(id),
            _ => {
                if let Some(map) = self.scopes[scope.index()].map_mut(kind) {
                    map.insert(name.to_owned(), id);
                }
            }
        }
        id
    }

    /// Resolve every pending reference.
    ///
    /// Scopes are processed in creation order. Each pending name walks from
    /// its scope outward; the first scope declaring the name claims all its
    /// references. Names nobody declares become `var`s of the outermost
    /// scope of the chain.
    pub fn resolve_pending(&mut self, ast: &mut Ast) {
        for index in 0..self.scopes.len() {
            let scope = ScopeId::new(u32::try_from(index).unwrap_or(u32::MAX));
            let mut pending: Vec<(String, BindingId)> = self.scopes[index].undef.drain().collect();
            pending.sort_by_key(|(_, id)| *id);

            for (name, undef) in pending {
                let references = mem::take(&mut self.bindings[undef.index()].references);
                let target = match self.lookup(scope, &name) {
                    Some(binding) => binding,
                    None => {
                        let outermost = self.chain(scope).last().unwrap_or(scope);
                        debug!(%name, "implicit global");
                        let existing = self.scope(outermost).vars.get(&name).copied();
                        match existing {
                            Some(var) => var,
                            None => self.new_binding(outermost, BindingKind::Var, &name),
                        }
                    }
                };
                debug!(%name, ?scope, ?target, refs = references.len(), "resolved pending references");
                for node in references {
                    self.attach(ast, target, node);
                }
            }
        }
    }

    /// Give `binding` a new name, rewriting every referencing node.
    ///
    /// If the owning scope already has a binding of the same kind under
    /// `new_name`, the two merge: references move over and nodes are
    /// repointed. An `Undef` binding cannot be renamed.
    pub fn rename(&mut self, ast: &mut Ast, binding: BindingId, new_name: &str) -> Result<(), ScopeError> {
        let data = self
            .bindings
            .get(binding.index())
            .ok_or(ScopeError::UnknownBinding(binding))?;
        let (kind, scope, old_name) = (data.kind, data.scope, data.name.clone());
        if kind == BindingKind::Undef {
            return Err(ScopeError::Unresolved { name: old_name });
        }

        for &node in &data.references {
            ast.get_mut(node).set_name(new_name);
        }
        debug!(from = %old_name, to = %new_name, ?kind, "rename");

        if let Some(map) = self.scopes[scope.index()].map_mut(kind) {
            if map.get(&old_name) == Some(&binding) {
                map.remove(&old_name);
            }
            match map.get(new_name).copied() {
                Some(existing) if existing != binding => {
                    let references = mem::take(&mut self.bindings[binding.index()].references);
                    for &node in &references {
                        ast.get_mut(node).set_binding(Some(existing));
                    }
                    self.bindings[existing.index()].references.extend(references);
                }
                _ => {
                    map.insert(new_name.to_owned(), binding);
                }
            }
        }
        self.bindings[binding.index()].name = new_name.to_owned();
        Ok(())
    }
}
