//! Cases and the sequences that chain them.

use graft_ir::{Ast, NodeId};
use graft_patterns::{compare, Pattern};
use tracing::trace;

use crate::{Action, MatchError, SequenceSpec};

/// A pattern anchored at one depth.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchCase {
    pub depth: u32,
    pub pattern: Pattern,
    active: bool,
}

impl MatchCase {
    pub fn new(depth: u32, pattern: Pattern) -> Self {
        MatchCase {
            depth,
            pattern,
            active: false,
        }
    }

    /// Only the case under a sequence's cursor is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Outcome of testing a sequence against one node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    NoMatch,
    /// Matched; the next case waits at this depth.
    Advanced(u32),
    /// Matched the last case.
    Finished,
}

/// Ordered cases that must match one after another during a single walk,
/// plus what to do once they all did.
#[derive(Clone, Debug)]
pub struct MatchSequence {
    name: String,
    cases: Vec<MatchCase>,
    cursor: usize,
    captured: Vec<NodeId>,
    action: Option<Action>,
}

impl MatchSequence {
    pub fn new(name: impl Into<String>, mut cases: Vec<MatchCase>, action: Option<Action>) -> Result<Self, MatchError> {
        let name = name.into();
        for case in &mut cases {
            case.active = false;
        }
        let Some(first) = cases.first_mut() else {
            return Err(MatchError::EmptySequence { name });
        };
        first.active = true;
        Ok(MatchSequence {
            name,
            cases,
            cursor: 0,
            captured: Vec::new(),
            action,
        })
    }

    /// Build from a loaded spec. Unnamed specs are called `sequence #<index>`.
    pub fn from_spec(spec: SequenceSpec, index: usize) -> Result<Self, MatchError> {
        let name = spec.name.clone().unwrap_or_else(|| format!("sequence #{index}"));
        let action = spec
            .resolved_action(&name)?
            .map(|action| Action::from_spec(action, &name))
            .transpose()?;
        let cases = spec
            .cases
            .into_iter()
            .enumerate()
            .map(|(index, case)| -> Result<MatchCase, MatchError> {
                let depth = case.depth;
                Ok(MatchCase::new(depth, case.resolve_pattern(&name, index)?))
            })
            .collect::<Result<Vec<_>, MatchError>>()?;
        MatchSequence::new(name, cases, action)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn cases(&self) -> &[MatchCase] {
        &self.cases
    }

    /// The case waiting to match, `None` once finished.
    pub fn current(&self) -> Option<&MatchCase> {
        self.cases.get(self.cursor)
    }

    /// Depth of the current case.
    pub fn depth(&self) -> Option<u32> {
        self.current().map(|case| case.depth)
    }

    /// Nodes matched so far, one per completed case.
    #[inline]
    pub fn captured(&self) -> &[NodeId] {
        &self.captured
    }

    #[inline]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cursor == self.cases.len()
    }

    /// Test the current case against `node` visited at `depth`.
    pub fn step(&mut self, ast: &Ast, node: NodeId, depth: u32) -> Step {
        let Some(case) = self.cases.get_mut(self.cursor) else {
            return Step::NoMatch;
        };
        if case.depth != depth || !compare(ast, node, &case.pattern) {
            return Step::NoMatch;
        }
        trace!(sequence = %self.name, case = self.cursor, ?node, depth, "case matched");

        case.active = false;
        self.captured.push(node);
        self.cursor += 1;
        match self.cases.get_mut(self.cursor) {
            Some(next) => {
                next.active = true;
                Step::Advanced(next.depth)
            }
            None => Step::Finished,
        }
    }
}
