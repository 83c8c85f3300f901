//! Sequence bookkeeping during a walk.
//!
//! Active sequences are bucketed by the depth of their current case, so a
//! visit only tests the sequences that can possibly match at that depth. The
//! registry also tracks the deepest bucket in use: below it nothing can
//! match any more, which is what lets the walk prune.

use std::fmt;

use graft_ir::{Ast, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{MatchError, MatchSequence, SequenceSpec, Step};

/// Index of a registered sequence.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SeqId(u32);

impl SeqId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqId({})", self.0)
    }
}

/// A sequence that matched all its cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completed {
    pub name: String,
    pub captured: Vec<NodeId>,
}

/// What a walk achieved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Finished sequences in firing order.
    pub completed: Vec<Completed>,
    /// Names of sequences still waiting on a case.
    pub unfinished: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MatchRegistry {
    /// Retired sequences leave a `None`, so ids stay stable.
    sequences: Vec<Option<MatchSequence>>,
    buckets: FxHashMap<u32, SmallVec<[SeqId; 4]>>,
    max_depth: Option<u32>,
    completed: Vec<Completed>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        MatchRegistry::default()
    }

    /// Build sequences from `specs` and register them in order.
    pub fn from_specs(specs: impl IntoIterator<Item = SequenceSpec>) -> Result<Self, MatchError> {
        let mut registry = MatchRegistry::new();
        for (index, spec) in specs.into_iter().enumerate() {
            registry.register(MatchSequence::from_spec(spec, index)?);
        }
        Ok(registry)
    }

    /// Add `sequence` to the bucket of its current case.
    pub fn register(&mut self, sequence: MatchSequence) -> SeqId {
        let id = SeqId(u32::try_from(self.sequences.len()).unwrap_or(u32::MAX));
        if let Some(depth) = sequence.depth() {
            self.bucket_mut(depth).push(id);
            self.max_depth = Some(self.max_depth.map_or(depth, |max| max.max(depth)));
        }
        debug!(?id, name = sequence.name(), cases = sequence.cases().len(), "sequence registered");
        self.sequences.push(Some(sequence));
        id
    }

    pub fn sequence(&self, id: SeqId) -> Option<&MatchSequence> {
        self.sequences.get(id.index()).and_then(Option::as_ref)
    }

    /// Deepest depth any active sequence waits at. `None` when nothing is
    /// active.
    #[inline]
    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// Sequences waiting at `depth`, in registration and arrival order.
    pub fn bucket(&self, depth: u32) -> &[SeqId] {
        self.buckets.get(&depth).map_or(&[][..], |bucket| bucket.as_slice())
    }

    pub fn active_count(&self) -> usize {
        self.buckets.values().map(SmallVec::len).sum()
    }

    #[inline]
    pub fn completed(&self) -> &[Completed] {
        &self.completed
    }

    /// Whether the children of a node at `depth` can be skipped.
    pub fn should_skip(&self, depth: u32) -> bool {
        self.max_depth.map_or(true, |max| depth >= max)
    }

    /// Test the bucket for `depth` against `node`.
    ///
    /// Works on a snapshot of the bucket: a sequence that advances into a
    /// bucket is not tested again on this node. Returns the sequences that
    /// finished, in bucket order; they are no longer registered.
    pub fn on_enter(&mut self, ast: &Ast, node: NodeId, depth: u32) -> Vec<MatchSequence> {
        let Some(bucket) = self.buckets.get(&depth) else {
            return Vec::new();
        };
        let snapshot = bucket.clone();

        let mut finished = Vec::new();
        let mut changed = false;
        for id in snapshot {
            let Some(sequence) = self.sequences.get_mut(id.index()).and_then(Option::as_mut) else {
                continue;
            };
            match sequence.step(ast, node, depth) {
                Step::NoMatch => {}
                Step::Advanced(next) => {
                    debug!(?id, ?node, from = depth, to = next, "sequence advanced");
                    self.unbucket(id, depth);
                    self.bucket_mut(next).push(id);
                    changed = true;
                }
                Step::Finished => {
                    debug!(?id, ?node, depth, "sequence finished");
                    self.unbucket(id, depth);
                    if let Some(sequence) = self.sequences.get_mut(id.index()).and_then(Option::take) {
                        finished.push(sequence);
                    }
                    changed = true;
                }
            }
        }
        if changed {
            self.recompute_max_depth();
        }
        finished
    }

    /// Record a finished sequence returned by [`on_enter`](Self::on_enter).
    pub fn complete(&mut self, sequence: &MatchSequence) {
        self.completed.push(Completed {
            name: sequence.name().to_owned(),
            captured: sequence.captured().to_vec(),
        });
    }

    pub fn into_report(self) -> MatchReport {
        MatchReport {
            completed: self.completed,
            unfinished: self
                .sequences
                .into_iter()
                .flatten()
                .map(|sequence| sequence.name().to_owned())
                .collect(),
        }
    }

    fn bucket_mut(&mut self, depth: u32) -> &mut SmallVec<[SeqId; 4]> {
        self.buckets.entry(depth).or_default()
    }

    fn unbucket(&mut self, id: SeqId, depth: u32) {
        if let Some(bucket) = self.buckets.get_mut(&depth) {
            bucket.retain(|other| *other != id);
            if bucket.is_empty() {
                self.buckets.remove(&depth);
            }
        }
    }

    fn recompute_max_depth(&mut self) {
        self.max_depth = self.buckets.keys().copied().max();
    }
}
