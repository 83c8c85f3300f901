//! Serializable summary of a rewrite.

use graft_ir::{Ast, NodeId};
use graft_match::MatchReport;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    /// Sequences that fired, in firing order.
    pub completed: Vec<FiredSequence>,
    /// Sequences that never got through all their cases.
    pub unfinished: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FiredSequence {
    pub name: String,
    pub captured: Vec<CapturedNode>,
}

/// A node matched by one case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CapturedNode {
    #[serde(rename = "type")]
    pub ty: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl CapturedNode {
    fn new(ast: &Ast, id: NodeId) -> Self {
        let node = ast.get(id);
        let span = node.span();
        CapturedNode {
            ty: node.ty().name(),
            start: span.map(|s| s.start),
            end: span.map(|s| s.end),
        }
    }
}

impl RewriteReport {
    pub(crate) fn new(ast: &Ast, report: MatchReport) -> Self {
        RewriteReport {
            completed: report
                .completed
                .into_iter()
                .map(|fired| FiredSequence {
                    captured: fired.captured.iter().map(|&id| CapturedNode::new(ast, id)).collect(),
                    name: fired.name,
                })
                .collect(),
            unfinished: report.unfinished,
        }
    }
}
