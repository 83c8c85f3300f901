//! Match errors.

use graft_ir::IrError;
use graft_patterns::PatternError;
use graft_scope::ScopeError;
use thiserror::Error;

/// Failure to load or run match sequences.
///
/// Load-time variants reject a spec before any tree is touched. The only
/// run-time failures are import errors in patch code and misuse of the scope
/// tree during a rename.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("sequence `{name}` has no cases")]
    EmptySequence { name: String },

    #[error("sequence `{name}` names more than one action")]
    MultipleActions { name: String },

    #[error("sequence `{name}`, case {index}: give either a non-wildcard `pattern` or an `example`")]
    CasePattern { name: String, index: usize },

    #[error("sequence `{name}`: REPLACE needs at least one node of code")]
    EmptyReplacement { name: String },

    #[error("sequence `{name}`: invalid patch code: {source}")]
    PatchCode {
        name: String,
        #[source]
        source: IrError,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Import(#[from] IrError),

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("malformed sequence spec: {0}")]
    Json(#[from] serde_json::Error),
}
