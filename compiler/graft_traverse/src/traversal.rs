//! Traversal state and the walk itself.

use graft_ir::{ensure_sufficient_stack, Ast, FieldShape, NodeId, Slot};
use smallvec::SmallVec;
use tracing::trace;

use crate::Visitor;

/// Where the node at one level of the walk sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub parent: NodeId,
    pub slot: Slot,
    /// The node was removed from `slot` during its visit.
    detached: bool,
}

impl Frame {
    #[inline]
    fn new(parent: NodeId, slot: Slot) -> Self {
        Frame {
            parent,
            slot,
            detached: false,
        }
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Live handle passed to [`Visitor`] hooks.
///
/// `frames` holds one entry per ancestor level: the last frame names the
/// parent of the node being visited and the slot it occupies. The root has
/// no frame.
pub struct Traversal<'a> {
    ast: &'a mut Ast,
    depth: u32,
    skip: bool,
    stop: bool,
    replacement: Option<NodeId>,
    frames: SmallVec<[Frame; 16]>,
}

/// Walk `ast` from its root, calling `visitor` around every reachable node.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = ast.len()))]
pub fn traverse<V: Visitor + ?Sized>(ast: &mut Ast, visitor: &mut V) -> Result<(), V::Error> {
    let root = ast.root();
    let mut tr = Traversal {
        ast,
        depth: 0,
        skip: false,
        stop: false,
        replacement: None,
        frames: SmallVec::new(),
    };
    tr.walk(visitor, root)
}

impl Traversal<'_> {
    #[inline]
    pub fn ast(&self) -> &Ast {
        &*self.ast
    }

    #[inline]
    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut *self.ast
    }

    /// Depth of the node being visited. The root is at depth 0.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Ancestor frames, outermost first.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame `up` levels above the current node (`0` is the parent's frame).
    pub fn ancestor(&self, up: usize) -> Option<&Frame> {
        self.frames.iter().rev().nth(up)
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.frames.last().map(|frame| frame.parent)
    }

    /// Slot the current node occupies in its parent.
    #[inline]
    pub fn slot(&self) -> Option<Slot> {
        self.frames.last().map(|frame| frame.slot)
    }

    /// Do not walk the current node's children.
    #[inline]
    pub fn skip(&mut self) {
        self.skip = true;
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Abort the whole traversal. No further hooks run.
    #[inline]
    pub fn stop(&mut self) {
        self.stop = true;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Put `new` where the current node is and visit it instead.
    ///
    /// Called from `enter`, `new` gets its own `enter` at the same depth and
    /// the replaced node is neither descended into nor exited.
    pub fn replace(&mut self, new: NodeId) {
        match self.frames.last_mut() {
            None => self.ast.set_root(new),
            Some(frame) => {
                match (frame.detached, frame.slot.index) {
                    (true, Some(index)) => {
                        self.ast.insert_at(frame.parent, frame.slot.field, index, &[new]);
                    }
                    _ => {
                        self.ast.set_child_at(frame.parent, frame.slot, new);
                    }
                }
                frame.detached = false;
            }
        }
        self.replacement = Some(new);
    }

    /// Splice `nodes` into the enclosing list right before the current node.
    ///
    /// The inserted nodes are not visited. Returns `false`, doing nothing,
    /// when the current node is not a list element.
    pub fn insert_before(&mut self, nodes: &[NodeId]) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        let Some(index) = frame.slot.index else {
            return false;
        };
        if !self.ast.insert_at(frame.parent, frame.slot.field, index, nodes) {
            return false;
        }
        frame.slot.index = Some(index + nodes.len());
        true
    }

    /// Splice `nodes` into the enclosing list right after the current node.
    ///
    /// The inserted nodes are visited next. Returns `false`, doing nothing,
    /// when the current node is not a list element.
    pub fn insert_after(&mut self, nodes: &[NodeId]) -> bool {
        let Some(frame) = self.frames.last() else {
            return false;
        };
        let Some(index) = frame.slot.index else {
            return false;
        };
        let at = if frame.detached { index } else { index + 1 };
        self.ast.insert_at(frame.parent, frame.slot.field, at, nodes)
    }

    /// Detach the current node from its slot.
    ///
    /// Its children are not walked and it gets no `exit`. The root cannot be
    /// removed.
    pub fn remove(&mut self) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        if frame.detached {
            return false;
        }
        self.ast.remove_at(frame.parent, frame.slot);
        frame.detached = true;
        self.replacement = None;
        true
    }

    fn is_detached(&self) -> bool {
        self.frames.last().is_some_and(Frame::is_detached)
    }

    fn walk<V: Visitor + ?Sized>(&mut self, visitor: &mut V, node: NodeId) -> Result<(), V::Error> {
        ensure_sufficient_stack(|| self.walk_node(visitor, node))
    }

    fn walk_node<V: Visitor + ?Sized>(&mut self, visitor: &mut V, node: NodeId) -> Result<(), V::Error> {
        if self.stop {
            return Ok(());
        }

        visitor.enter(node, self)?;
        if let Some(new) = self.replacement.take() {
            self.skip = false;
            return self.walk(visitor, new);
        }
        if self.stop {
            trace!(?node, depth = self.depth, "traversal stopped");
            return Ok(());
        }
        if self.is_detached() {
            self.skip = false;
            return Ok(());
        }

        if !self.skip {
            self.depth += 1;
            let result = self.walk_children(visitor, node);
            self.depth -= 1;
            result?;
            if self.stop {
                return Ok(());
            }
        }
        self.skip = false;

        visitor.exit(node, self)?;
        self.replacement = None;
        self.skip = false;
        Ok(())
    }

    fn walk_children<V: Visitor + ?Sized>(&mut self, visitor: &mut V, node: NodeId) -> Result<(), V::Error> {
        for def in self.ast.ty(node).fields() {
            match def.shape {
                FieldShape::Value => {}
                FieldShape::Node | FieldShape::OptNode => {
                    if let Some(child) = self.ast.get(node).child(def.name) {
                        self.walk_slot(visitor, node, Slot::field(def.name), child)?;
                    }
                }
                FieldShape::List => {
                    let mut index = 0;
                    while index < self.ast.list_len(node, def.name) {
                        let slot = Slot::element(def.name, index);
                        index += 1;
                        if let Some(child) = self.ast.child_at(node, slot) {
                            let frame = self.walk_slot(visitor, node, slot, child)?;
                            index = frame.slot.index.unwrap_or(index) + usize::from(!frame.detached);
                        }
                        if self.stop {
                            return Ok(());
                        }
                    }
                }
            }
            if self.stop {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Visit `child` in `slot` of `parent` and return the frame as the visit
    /// left it.
    fn walk_slot<V: Visitor + ?Sized>(
        &mut self,
        visitor: &mut V,
        parent: NodeId,
        slot: Slot,
        child: NodeId,
    ) -> Result<Frame, V::Error> {
        self.frames.push(Frame::new(parent, slot));
        let result = self.walk(visitor, child);
        let frame = self.frames.pop().unwrap_or_else(|| Frame::new(parent, slot));
        result.map(|()| frame)
    }
}

#[cfg(test)]
mod tests;
