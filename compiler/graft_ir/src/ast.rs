//! Node arena and in-place slot mutation.

use crate::{Field, Node, NodeId, NodeType, Slot};

/// Arena owning every node of one tree.
///
/// The tree is the set of nodes reachable from `root`. Nodes spliced in by
/// patches are allocated here too; removed nodes stay allocated but are no
/// longer reachable.
#[derive(Clone, Debug)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Ast {
    /// Create an arena whose root is `root`.
    pub fn new(root: Node) -> Self {
        Ast {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Allocate a detached node.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// Get a node. Ids are only ever handed out by this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: NodeId) -> NodeType {
        self.get(id).ty()
    }

    /// Number of allocated nodes, reachable or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node currently occupying `slot` of `parent`.
    pub fn child_at(&self, parent: NodeId, slot: Slot) -> Option<NodeId> {
        let node = self.get(parent);
        match slot.index {
            Some(index) => node.children(slot.field).get(index).copied().flatten(),
            None => node.child(slot.field),
        }
    }

    /// Put `child` into `slot` of `parent`, overwriting the occupant.
    ///
    /// Returns `false` if the slot does not exist.
    pub fn set_child_at(&mut self, parent: NodeId, slot: Slot, child: NodeId) -> bool {
        let node = self.get_mut(parent);
        match slot.index {
            Some(index) => match node.children_mut(slot.field) {
                Some(items) if index < items.len() => {
                    items[index] = Some(child);
                    true
                }
                _ => false,
            },
            None => node.set_child(slot.field, Some(child)),
        }
    }

    /// Splice `nodes` into list `field` of `parent` starting at `index`
    /// (clamped to the list length).
    ///
    /// Returns `false` if `field` is not a list.
    pub fn insert_at(&mut self, parent: NodeId, field: &str, index: usize, nodes: &[NodeId]) -> bool {
        let Some(items) = self.get_mut(parent).children_mut(field) else {
            return false;
        };
        let at = index.min(items.len());
        items.splice(at..at, nodes.iter().copied().map(Some));
        true
    }

    /// Detach whatever occupies `slot` of `parent`.
    ///
    /// List elements are removed (later siblings shift down); single slots
    /// are cleared.
    pub fn remove_at(&mut self, parent: NodeId, slot: Slot) -> Option<NodeId> {
        let node = self.get_mut(parent);
        match slot.index {
            Some(index) => {
                let items = node.children_mut(slot.field)?;
                if index < items.len() {
                    items.remove(index)
                } else {
                    None
                }
            }
            None => match node.field_mut(slot.field) {
                Some(Field::Node(child)) => child.take(),
                _ => None,
            },
        }
    }

    /// Length of list `field` of `parent`; 0 if it is not a list.
    #[inline]
    pub fn list_len(&self, parent: NodeId, field: &str) -> usize {
        self.get(parent).children(field).len()
    }

    /// Nodes reachable from `from`, in pre-order.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            let before = stack.len();
            stack.extend(self.get(id).child_ids());
            stack[before..].reverse();
        }
        out
    }

    /// Follow a dotted field path from `from`.
    ///
    /// Each segment names a child field; a numeric segment after a list field
    /// picks an element (`declarations.0.id`). A list field not followed by an
    /// index resolves to nothing. `None` when any step is absent.
    pub fn resolve_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let mut current = from;
        let mut segments = path.split('.').filter(|s| !s.is_empty());
        while let Some(segment) = segments.next() {
            let node = self.get(current);
            current = match node.field(segment)? {
                Field::Value(_) => return None,
                Field::Node(child) => (*child)?,
                Field::List(items) => {
                    let index = segments.next()?.parse::<usize>().ok()?;
                    items.get(index).copied().flatten()?
                }
            };
        }
        Some(current)
    }

    /// Reachable identifiers named `name`, in pre-order.
    pub fn identifiers_named(&self, name: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.get(id).name() == Some(name))
            .collect()
    }
}
