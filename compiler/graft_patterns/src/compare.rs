//! Structural comparison of a live node against a [`Pattern`].

use graft_ir::{ensure_sufficient_stack, Ast, NodeId};
use serde_json::Value;

use crate::{Pattern, PatternField};

/// Does the node `candidate` satisfy `pattern`?
///
/// Kinds must be equal. After that only the pattern's fields are checked:
/// scalars by value, children recursively, lists at the constrained indices
/// only (an index past the candidate's end fails). Never mutates.
pub fn compare(ast: &Ast, candidate: NodeId, pattern: &Pattern) -> bool {
    ensure_sufficient_stack(|| compare_node(ast, candidate, pattern))
}

fn compare_node(ast: &Ast, candidate: NodeId, pattern: &Pattern) -> bool {
    let node = ast.get(candidate);
    if node.ty() != pattern.ty() {
        return false;
    }
    pattern.fields().iter().all(|(name, expected)| match expected {
        PatternField::Value(expected) => scalar_eq(node.value(name).unwrap_or(&Value::Null), expected),
        PatternField::Node(expected) => match (node.child(name), expected) {
            (None, None) => true,
            (Some(child), Some(expected)) => compare(ast, child, expected),
            _ => false,
        },
        PatternField::List(elements) => {
            let items = node.children(name);
            elements.iter().all(|(index, expected)| match (items.get(*index), expected) {
                (Some(None), None) => true,
                (Some(Some(child)), Some(expected)) => compare(ast, *child, expected),
                _ => false,
            })
        }
    })
}

/// JSON equality, except that numbers compare by numeric value (`1 == 1.0`).
#[allow(clippy::float_cmp)]
fn scalar_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}
