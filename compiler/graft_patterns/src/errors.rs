//! Pattern loading errors.

use graft_ir::IrError;
use thiserror::Error;

/// Failure to build a [`Pattern`](crate::Pattern). All variants are fatal
/// at spec load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("expected a pattern object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("pattern has no string `type` property")]
    MissingType,

    #[error("`{0}` is not a supported node type")]
    UnknownNodeType(String),

    #[error("`{ty}.{field}` pattern must be an array or an object keyed by index")]
    ExpectedList { ty: &'static str, field: &'static str },

    #[error("`{ty}.{field}` pattern has non-index key `{key}`")]
    BadListIndex {
        ty: &'static str,
        field: &'static str,
        key: String,
    },

    #[error("example tree is invalid: {0}")]
    Example(#[from] IrError),

    #[error("extract path `{0}` does not resolve in the example")]
    ExtractPath(String),
}
