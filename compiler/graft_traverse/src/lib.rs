//! Depth-first traversal with in-place mutation.
//!
//! A [`Visitor`] receives `enter`/`exit` hooks for every reachable node,
//! pre-order, children left to right in schema order. Each hook gets a
//! [`Traversal`] handle that knows where the current node sits (the frame
//! stack of `(parent, slot)` pairs) and can rewrite the tree around it:
//! replace it, splice siblings before or after it, remove it, skip its
//! children, or stop the walk.
//!
//! List slots are re-measured after every child, so siblings inserted or
//! removed mid-walk are picked up without skipping or revisiting anything.

mod traversal;
mod visitor;

pub use traversal::{traverse, Frame, Traversal};
pub use visitor::Visitor;
