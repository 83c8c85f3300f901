//! Graft IR - syntax tree model for the rewriting engine
//!
//! This crate contains the data structures every other graft crate works on:
//! - `NodeType`, the closed set of ESTree node kinds, and its field schema
//! - `Node` and `Field`, the per-node storage aligned with that schema
//! - `Ast`, the arena owning every node, addressed by `NodeId`
//! - Slot descriptors used to mutate a tree in place
//! - ESTree JSON import/export for the external parser and code generator
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: children are `NodeId` indices, never boxes
//! - **Closed Dispatch**: one exhaustive schema table drives traversal,
//!   comparison and (de)serialization alike
//! - **Detach, Don't Free**: removed nodes stay in the arena; they are simply
//!   no longer reachable from the root

mod ast;
mod errors;
mod estree;
mod ids;
mod node;
mod node_type;
mod span;
mod stack;

pub use ast::Ast;
pub use errors::IrError;
pub use estree::json_kind;
pub use ids::{BindingId, NodeId};
pub use node::{Field, Node, Slot};
pub use node_type::{FieldDef, FieldShape, NodeType};
pub use span::Span;
pub use stack::ensure_sufficient_stack;
