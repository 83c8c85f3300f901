#![allow(clippy::unwrap_used)]

use std::convert::Infallible;

use graft_ir::{Ast, Node, NodeId, NodeType};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::*;

fn program(body: Value) -> Ast {
    Ast::from_estree(&json!({ "type": "Program", "sourceType": "script", "body": body })).unwrap()
}

fn stmt(name: &str) -> Value {
    json!({ "type": "ExpressionStatement", "expression": { "type": "Identifier", "name": name } })
}

/// Name of an `ExpressionStatement`'s identifier expression.
fn stmt_name(ast: &Ast, id: NodeId) -> Option<&str> {
    ast.get(id).child("expression").and_then(|e| ast.get(e).name())
}

fn label(ast: &Ast, id: NodeId) -> String {
    let node = ast.get(id);
    node.name().map_or_else(|| node.ty().to_string(), str::to_owned)
}

/// Runs a closure on `enter` and records every hook it sees.
struct Recorder<F> {
    on_enter: F,
    events: Vec<String>,
}

fn recorder<F: FnMut(NodeId, &mut Traversal<'_>)>(on_enter: F) -> Recorder<F> {
    Recorder {
        on_enter,
        events: Vec::new(),
    }
}

impl<F: FnMut(NodeId, &mut Traversal<'_>)> Visitor for Recorder<F> {
    type Error = Infallible;

    fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Infallible> {
        self.events.push(format!("enter {} @{}", label(tr.ast(), node), tr.depth()));
        (self.on_enter)(node, tr);
        Ok(())
    }

    fn exit(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), Infallible> {
        self.events.push(format!("exit {}", label(tr.ast(), node)));
        Ok(())
    }
}

fn entered(events: &[String]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| e.strip_prefix("enter "))
        .map(|e| e.split(" @").next().unwrap())
        .collect()
}

#[test]
fn test_pre_order_with_depths() {
    // var a = 2;
    let mut ast = program(json!([{
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{
            "type": "VariableDeclarator",
            "id": { "type": "Identifier", "name": "a" },
            "init": { "type": "Literal", "value": 2, "raw": "2" }
        }]
    }]));
    let mut v = recorder(|_, _| {});
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(
        v.events,
        [
            "enter Program @0",
            "enter VariableDeclaration @1",
            "enter VariableDeclarator @2",
            "enter a @3",
            "exit a",
            "enter Literal @3",
            "exit Literal",
            "exit VariableDeclarator",
            "exit VariableDeclaration",
            "exit Program",
        ]
    );
}

#[test]
fn test_frames_track_slots() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut seen = Vec::new();
    let mut v = recorder(|node, tr| {
        if tr.ast().get(node).name() == Some("b") {
            seen = tr.frames().iter().map(|f| f.slot).collect();
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(seen, [Slot::element("body", 1), Slot::field("expression")]);
}

#[test]
fn test_skip_suppresses_children_only() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut v = recorder(|node, tr| {
        assert!(!tr.is_skipped());
        if tr.ast().ty(node) == NodeType::ExpressionStatement {
            tr.skip();
            assert!(tr.is_skipped());
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(
        entered(&v.events),
        ["Program", "ExpressionStatement", "ExpressionStatement"]
    );
    assert!(v.events.contains(&"exit ExpressionStatement".to_owned()));
}

#[test]
fn test_stop_runs_no_further_hooks() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut v = recorder(|node, tr| {
        assert!(!tr.is_stopped());
        if tr.ast().get(node).name() == Some("a") {
            tr.stop();
            assert!(tr.is_stopped());
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(
        v.events,
        ["enter Program @0", "enter ExpressionStatement @1", "enter a @2"]
    );
}

#[test]
fn test_replace_visits_new_node_at_same_depth() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut v = recorder(|node, tr| {
        if tr.ast().get(node).name() == Some("a") {
            let new = tr.ast_mut().alloc(Node::identifier("z"));
            tr.replace(new);
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert!(v.events.contains(&"enter z @2".to_owned()));
    assert!(!v.events.contains(&"exit a".to_owned()));
    assert_eq!(
        ast.to_estree()["body"][0]["expression"],
        json!({ "type": "Identifier", "name": "z" })
    );
}

#[test]
fn test_replace_root() {
    let mut ast = program(json!([]));
    let mut replaced = false;
    let mut v = recorder(|_, tr| {
        if !replaced {
            replaced = true;
            let id = tr.ast_mut().alloc(Node::identifier("root"));
            tr.replace(id);
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(ast.ty(ast.root()), NodeType::Identifier);
    assert_eq!(v.events, ["enter Program @0", "enter root @0", "exit root"]);
}

#[test]
fn test_insert_after_is_visited_insert_before_is_not() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut v = recorder(|node, tr| {
        if tr.ast().get(node).name() == Some("a") {
            let before = tr.ast_mut().import(&stmt("before")).unwrap();
            let after = tr.ast_mut().import(&stmt("after")).unwrap();
            // `a` is the expression; its statement already moved past `before`.
            let parent_frame = *tr.ancestor(1).unwrap();
            assert_eq!(parent_frame.slot, Slot::element("body", 1));
            assert!(!tr.insert_before(&[before]));
            assert!(!tr.insert_after(&[after]));
        }
        if stmt_name(tr.ast(), node) == Some("a") {
            let before = tr.ast_mut().import(&stmt("before")).unwrap();
            let after = tr.ast_mut().import(&stmt("after")).unwrap();
            assert!(tr.insert_before(&[before]));
            assert!(tr.insert_after(&[after]));
        }
    });
    traverse(&mut ast, &mut v).unwrap();

    assert_eq!(
        entered(&v.events)
            .into_iter()
            .filter(|name| *name != "ExpressionStatement")
            .collect::<Vec<_>>(),
        ["Program", "a", "after", "b"]
    );
    let names: Vec<_> = ast.to_estree()["body"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["expression"]["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["before", "a", "after", "b"]);
}

#[test]
fn test_remove_list_element_keeps_next_sibling() {
    let mut ast = program(json!([stmt("a"), stmt("b"), stmt("c")]));
    let mut v = recorder(|node, tr| {
        if stmt_name(tr.ast(), node) == Some("a") {
            assert_eq!(tr.slot(), Some(Slot::element("body", 0)));
            assert!(tr.remove());
            assert!(!tr.remove());
        }
    });
    traverse(&mut ast, &mut v).unwrap();

    assert_eq!(
        entered(&v.events),
        ["Program", "ExpressionStatement", "ExpressionStatement", "b", "ExpressionStatement", "c"]
    );
    assert_eq!(ast.list_len(ast.root(), "body"), 2);
}

#[test]
fn test_remove_single_slot_and_root() {
    let mut ast = program(json!([stmt("a")]));
    let mut root_removed = true;
    let mut v = recorder(|node, tr| {
        if tr.parent().is_none() {
            root_removed = tr.remove();
        }
        if tr.ast().get(node).name() == Some("a") {
            assert!(tr.remove());
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert!(!v.events.contains(&"exit a".to_owned()));
    assert!(!root_removed);
    assert_eq!(ast.to_estree()["body"][0]["expression"], Value::Null);
}

#[test]
fn test_replace_after_remove_reinserts() {
    let mut ast = program(json!([stmt("a"), stmt("b")]));
    let mut v = recorder(|node, tr| {
        if stmt_name(tr.ast(), node) == Some("a") {
            tr.remove();
            let new = tr.ast_mut().import(&stmt("z")).unwrap();
            tr.replace(new);
        }
    });
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(ast.list_len(ast.root(), "body"), 2);
    assert!(v.events.contains(&"enter z @2".to_owned()));
    assert!(v.events.contains(&"enter b @2".to_owned()));
}

#[test]
fn test_visitor_error_aborts() {
    struct FailOn(&'static str);

    impl Visitor for FailOn {
        type Error = String;

        fn enter(&mut self, node: NodeId, tr: &mut Traversal<'_>) -> Result<(), String> {
            match tr.ast().get(node).name() {
                Some(name) if name == self.0 => Err(format!("hit {name}")),
                _ => Ok(()),
            }
        }
    }

    let mut ast = program(json!([stmt("a"), stmt("b")]));
    assert_eq!(traverse(&mut ast, &mut FailOn("b")), Err("hit b".to_owned()));
    assert_eq!(traverse(&mut ast, &mut FailOn("nope")), Ok(()));
}

#[test]
fn test_holes_are_skipped() {
    let mut ast = Ast::from_estree(&json!({
        "type": "ArrayExpression",
        "elements": [null, { "type": "Identifier", "name": "x" }, null]
    }))
    .unwrap();
    let mut v = recorder(|_, _| {});
    traverse(&mut ast, &mut v).unwrap();
    assert_eq!(entered(&v.events), ["ArrayExpression", "x"]);
}
