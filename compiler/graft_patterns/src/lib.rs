//! Structural patterns over graft syntax trees.
//!
//! A [`Pattern`] is a partial node: a kind plus whichever fields should be
//! constrained. Every field left out is a wildcard. Patterns come from JSON
//! specs ([`Pattern::from_json`]) or from a concrete example subtree
//! ([`Pattern::from_example`]), and are tested against live nodes with
//! [`compare`].

mod compare;
mod errors;
mod example;
mod pattern;

pub use compare::compare;
pub use errors::PatternError;
pub use example::WILDCARD_NAME;
pub use pattern::{Pattern, PatternField};
