//! Errors raised while importing trees.

use thiserror::Error;

/// Import failure. Every variant is fatal: the engine cannot walk a tree it
/// could not model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("expected a node object, found {found}")]
    NotANode { found: &'static str },

    #[error("node object has no string `type` property")]
    MissingType,

    #[error("`{0}` is not a supported node type")]
    UnknownNodeType(String),

    #[error("`{ty}.{field}` must be an array of nodes")]
    ExpectedList { ty: &'static str, field: &'static str },
}
