use graft_ir::BindingId;
use thiserror::Error;

/// Scope tree misuse. These indicate a bug in the caller, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("{0:?} does not belong to this scope tree")]
    UnknownBinding(BindingId),

    #[error("cannot rename `{name}`: its binding was never resolved")]
    Unresolved { name: String },
}
