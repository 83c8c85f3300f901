//! The hook trait driven by [`traverse`](crate::traverse).

use graft_ir::NodeId;

use crate::Traversal;

/// Hooks called around every visited node.
///
/// Both hooks default to doing nothing. An `Err` from either aborts the
/// traversal and is returned from [`traverse`](crate::traverse) as-is.
pub trait Visitor {
    type Error;

    /// Called before the node's children are walked.
    fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Self::Error> {
        let _ = (node, tr);
        Ok(())
    }

    /// Called after the node's children were walked (or skipped).
    fn exit(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Self::Error> {
        let _ = (node, tr);
        Ok(())
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Error = V::Error;

    #[inline]
    fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Self::Error> {
        (**self).enter(node, tr)
    }

    #[inline]
    fn exit(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Self::Error> {
        (**self).exit(node, tr)
    }
}
