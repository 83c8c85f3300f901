use std::io;
use std::path::PathBuf;

use graft_ir::IrError;
use graft_match::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid input tree: {0}")]
    Tree(#[from] IrError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
