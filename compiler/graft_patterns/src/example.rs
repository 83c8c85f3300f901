//! Patterns written as example code.
//!
//! Instead of hand-writing a partial node, a pattern can be derived from a
//! parsed snippet. Positions and `Literal.raw` are dropped (they would tie
//! the pattern to one formatting of the code), and an identifier spelled
//! [`WILDCARD_NAME`] stands for "anything here".

use graft_ir::{ensure_sufficient_stack, Ast, Field, NodeId, NodeType};
use serde_json::Value;
use tracing::trace;

use crate::{Pattern, PatternError, PatternField};

/// Identifier name that turns into a wildcard.
pub const WILDCARD_NAME: &str = "__";

impl Pattern {
    /// Derive a pattern from the subtree at `id`.
    ///
    /// Returns `None` when the subtree itself is a wildcard.
    pub fn from_example(ast: &Ast, id: NodeId) -> Option<Pattern> {
        ensure_sufficient_stack(|| simplify(ast, id))
    }

    /// Import an example tree and derive a pattern from it, optionally from
    /// the node at the dotted `extract` path (e.g. `body.0.expression` to
    /// skip the `Program` wrapper a parser puts around a snippet).
    pub fn from_example_json(value: &Value, extract: Option<&str>) -> Result<Option<Pattern>, PatternError> {
        let ast = Ast::from_estree(value)?;
        let root = match extract {
            Some(path) => ast
                .resolve_path(ast.root(), path)
                .ok_or_else(|| PatternError::ExtractPath(path.to_owned()))?,
            None => ast.root(),
        };
        Ok(Pattern::from_example(&ast, root))
    }
}

fn simplify(ast: &Ast, id: NodeId) -> Option<Pattern> {
    let node = ast.get(id);
    if node.name() == Some(WILDCARD_NAME) {
        trace!(?id, "wildcard in example");
        return None;
    }

    let ty = node.ty();
    let mut fields = Vec::new();
    for (def, field) in node.fields() {
        let constraint = match field {
            Field::Value(None) => continue,
            Field::Value(Some(_)) if ty == NodeType::Literal && def.name == "raw" => continue,
            Field::Value(Some(value)) => PatternField::Value(value.clone()),
            Field::Node(child) => match child.and_then(|child| Pattern::from_example(ast, child)) {
                Some(pattern) => PatternField::Node(Some(Box::new(pattern))),
                None => continue,
            },
            Field::List(items) => PatternField::List(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        let pattern = Pattern::from_example(ast, (*item)?)?;
                        Some((index, Some(pattern)))
                    })
                    .collect(),
            ),
        };
        fields.push((def.name, constraint));
    }
    Some(Pattern { ty, fields })
}
