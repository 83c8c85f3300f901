//! Depth-anchored pattern matching with rewrite actions.
//!
//! A [`MatchSequence`] is an ordered list of [`MatchCase`]s, each a pattern
//! pinned to one tree depth. During a walk the [`MatchRegistry`] tests every
//! sequence whose current case sits at the visited depth; a match advances
//! the sequence, and the last match fires its [`Action`] right at the node
//! being visited, through the live [`Traversal`](graft_traverse::Traversal).
//!
//! Sequences are usually loaded from JSON [`SequenceSpec`]s and driven by
//! [`run_matches`].

mod action;
mod errors;
mod pass;
mod registry;
mod sequence;
mod spec;

pub use action::Action;
pub use errors::MatchError;
pub use pass::{run_matches, MatchPass};
pub use registry::{Completed, MatchReport, MatchRegistry, SeqId};
pub use sequence::{MatchCase, MatchSequence, Step};
pub use spec::{parse_specs, ActionSpec, CaseSpec, PatchInstruction, PatchKind, RenameInstruction, SequenceSpec};
