//! Property tests for the structural comparer.
//!
//! 1. Dropping any subset of a pattern's fields never turns a match into a
//!    mismatch (omitted fields are wildcards).
//! 2. A pattern never matches a node of another kind, whatever it constrains.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::doc_markdown, clippy::redundant_closure_for_method_calls)]

use graft_ir::{Ast, NodeType};
use graft_patterns::{compare, Pattern};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

// -- Tree Generation Strategies --

fn identifier_strategy() -> impl Strategy<Value = Value> {
    prop::string::string_regex("[a-z][a-z0-9]{0,4}")
        .expect("valid regex")
        .prop_map(|name| json!({ "type": "Identifier", "name": name }))
}

fn literal_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!({ "type": "Literal", "value": n, "raw": n.to_string() })),
        any::<bool>().prop_map(|b| json!({ "type": "Literal", "value": b, "raw": b.to_string() })),
    ]
}

/// Small expression trees mixing single children, lists and holes.
fn expression_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![identifier_strategy(), literal_strategy()];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone(), prop::sample::select(vec!["+", "-", "*", "==="])).prop_map(
                |(left, right, op)| json!({ "type": "BinaryExpression", "operator": op, "left": left, "right": right })
            ),
            prop::collection::vec(prop::option::of(inner.clone()), 0..4)
                .prop_map(|elements| json!({ "type": "ArrayExpression", "elements": elements })),
            (inner.clone(), prop::collection::vec(inner, 0..3)).prop_map(
                |(callee, arguments)| json!({ "type": "CallExpression", "callee": callee, "arguments": arguments })
            ),
        ]
    })
}

/// Remove non-`type` properties from every object, driven by `mask`.
fn drop_fields(value: &Value, mask: &mut impl Iterator<Item = bool>) -> Value {
    match value {
        Value::Object(object) => {
            let mut kept = Map::new();
            for (key, item) in object {
                if key == "type" || !mask.next().unwrap_or(false) {
                    kept.insert(key.clone(), drop_fields(item, mask));
                }
            }
            Value::Object(kept)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| drop_fields(item, mask)).collect()),
        other => other.clone(),
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn omitted_fields_are_wildcards(tree in expression_strategy(), mask in prop::collection::vec(any::<bool>(), 64)) {
        let ast = Ast::from_estree(&tree).unwrap();
        let full = Pattern::from_json(&tree).unwrap();
        prop_assert!(compare(&ast, ast.root(), &full));

        let pruned = Pattern::from_json(&drop_fields(&tree, &mut mask.into_iter())).unwrap();
        prop_assert!(compare(&ast, ast.root(), &pruned));
    }

    #[test]
    fn differing_kinds_never_match(
        tree in expression_strategy(),
        ty in prop::sample::select(NodeType::ALL.to_vec()),
    ) {
        let ast = Ast::from_estree(&tree).unwrap();
        prop_assume!(ast.ty(ast.root()) != ty);
        prop_assert!(!compare(&ast, ast.root(), &Pattern::new(ty)));
    }

    #[test]
    fn example_pattern_matches_its_source(tree in expression_strategy()) {
        let ast = Ast::from_estree(&tree).unwrap();
        let pattern = Pattern::from_example(&ast, ast.root()).expect("no wildcards generated");
        prop_assert!(compare(&ast, ast.root(), &pattern));
    }
}
