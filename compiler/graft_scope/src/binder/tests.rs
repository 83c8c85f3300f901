#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::*;
use crate::Binding;
use graft_ir::BindingId;

fn program(body: Value) -> Ast {
    Ast::from_estree(&json!({ "type": "Program", "sourceType": "script", "body": body })).unwrap()
}

fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn lit(value: Value) -> Value {
    let raw = value.to_string();
    json!({ "type": "Literal", "value": value, "raw": raw })
}

fn var(name: &str, init: Value) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": "var",
        "declarations": [{ "type": "VariableDeclarator", "id": ident(name), "init": init }]
    })
}

fn function(name: &str, params: Value, body: Value) -> Value {
    json!({
        "type": "FunctionDeclaration",
        "id": ident(name),
        "params": params,
        "body": { "type": "BlockStatement", "body": body },
        "generator": false,
        "async": false
    })
}

fn expr(expression: Value) -> Value {
    json!({ "type": "ExpressionStatement", "expression": expression })
}

fn call(callee: Value, arguments: Value) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments, "optional": false })
}

fn member(object: Value, property: Value, computed: bool) -> Value {
    json!({
        "type": "MemberExpression",
        "object": object,
        "property": property,
        "computed": computed,
        "optional": false
    })
}

fn bind(ast: &mut Ast) -> ScopeTree {
    bind_scopes(ast, &ScopeOptions::default())
}

/// Bindings of every identifier named `name`, in document order.
fn bindings_of(ast: &Ast, name: &str) -> Vec<Option<BindingId>> {
    ast.identifiers_named(name)
        .into_iter()
        .map(|id| ast.get(id).binding())
        .collect()
}

fn the_binding<'t>(tree: &'t ScopeTree, ast: &Ast, name: &str) -> &'t Binding {
    let ids = bindings_of(ast, name);
    assert!(ids.windows(2).all(|w| w[0] == w[1]), "`{name}` has several bindings: {ids:?}");
    tree.binding(ids[0].unwrap()).unwrap()
}

#[test]
fn test_top_level_var() {
    let mut ast = program(json!([var("a", Value::Null)]));
    let tree = bind(&mut ast);
    let binding = the_binding(&tree, &ast, "a");
    assert_eq!(binding.kind, BindingKind::Var);
    assert_eq!(binding.scope, ScopeId::GLOBAL);
    assert_eq!(
        tree.scope(ScopeId::GLOBAL).vars.get("a").copied(),
        ast.get(ast.identifiers_named("a")[0]).binding()
    );
}

#[test]
fn test_param_and_var_coalesce() {
    // function test(a) { var a = true ? a : 1; }
    let mut ast = program(json!([function(
        "test",
        json!([ident("a")]),
        json!([var(
            "a",
            json!({
                "type": "ConditionalExpression",
                "test": lit(json!(true)),
                "consequent": ident("a"),
                "alternate": lit(json!(1))
            })
        )])
    )]));
    let tree = bind(&mut ast);

    let a = the_binding(&tree, &ast, "a");
    assert_eq!(a.kind, BindingKind::Param);
    assert_eq!(a.references.len(), 3);
    assert!(tree.scope(a.scope).vars.is_empty());
    assert_eq!(tree.scope(a.scope).kind, ScopeKind::Function);

    let test = the_binding(&tree, &ast, "test");
    assert_eq!((test.kind, test.scope), (BindingKind::Var, ScopeId::GLOBAL));
}

#[test]
fn test_hoisted_function_resolves_at_end() {
    // function f() { g(); } function g() {}
    let mut ast = program(json!([
        function("f", json!([]), json!([expr(call(ident("g"), json!([])))])),
        function("g", json!([]), json!([])),
    ]));
    let tree = bind(&mut ast);
    let g = the_binding(&tree, &ast, "g");
    assert_eq!((g.kind, g.scope, g.references.len()), (BindingKind::Var, ScopeId::GLOBAL, 2));
    assert!(tree.scopes().all(|(_, scope)| scope.undef.is_empty()));
}

#[test]
fn test_local_var_hoists_over_outer() {
    // var x = 1; function f() { g(x); var x = 2; }
    let mut ast = program(json!([
        var("x", lit(json!(1))),
        function(
            "f",
            json!([]),
            json!([expr(call(ident("g"), json!([ident("x")]))), var("x", lit(json!(2)))])
        ),
    ]));
    let tree = bind(&mut ast);

    let xs = bindings_of(&ast, "x");
    assert_eq!(xs.len(), 3);
    assert_ne!(xs[0], xs[1]);
    assert_eq!(xs[1], xs[2]);
    let inner = tree.binding(xs[1].unwrap()).unwrap();
    assert_eq!(inner.kind, BindingKind::Var);
    assert_ne!(inner.scope, ScopeId::GLOBAL);
    assert_eq!(tree.binding(xs[0].unwrap()).unwrap().references.len(), 1);
    assert!(tree.scopes().all(|(_, scope)| scope.undef.is_empty()));
}

#[test]
fn test_closure_sees_var_declared_after_it() {
    // var x; function f() { function k() { x; } var x; }
    let mut ast = program(json!([
        var("x", Value::Null),
        function(
            "f",
            json!([]),
            json!([
                function("k", json!([]), json!([expr(ident("x"))])),
                var("x", Value::Null),
            ])
        ),
    ]));
    let tree = bind(&mut ast);

    let xs = bindings_of(&ast, "x");
    assert_eq!(xs.len(), 3);
    assert_ne!(xs[0], xs[1]);
    assert_eq!(xs[1], xs[2]);
    let inner = tree.binding(xs[1].unwrap()).unwrap();
    let k = the_binding(&tree, &ast, "k");
    assert_eq!(inner.scope, k.scope);
}

#[test]
fn test_nested_function_used_before_declaration() {
    // function h() {} function f() { h(); function h() {} }
    let mut ast = program(json!([
        function("h", json!([]), json!([])),
        function(
            "f",
            json!([]),
            json!([expr(call(ident("h"), json!([]))), function("h", json!([]), json!([]))])
        ),
    ]));
    let tree = bind(&mut ast);

    let hs = bindings_of(&ast, "h");
    assert_eq!(hs.len(), 3);
    assert_ne!(hs[0], hs[1]);
    assert_eq!(hs[1], hs[2]);
    let inner = tree.binding(hs[1].unwrap()).unwrap();
    let f = the_binding(&tree, &ast, "f");
    assert_eq!(inner.kind, BindingKind::Var);
    assert_ne!(inner.scope, f.scope);
    assert_eq!(tree.scope(inner.scope).parent, Some(ScopeId::GLOBAL));
}

#[test]
fn test_unresolved_becomes_implicit_global() {
    // function f() { x = 1; }
    let mut ast = program(json!([function(
        "f",
        json!([]),
        json!([expr(json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": ident("x"),
            "right": lit(json!(1))
        }))])
    )]));
    let tree = bind(&mut ast);
    let x = the_binding(&tree, &ast, "x");
    assert_eq!((x.kind, x.scope), (BindingKind::Var, ScopeId::GLOBAL));
}

#[test]
fn test_member_properties() {
    // var a, b; a.b; a[b];
    let mut ast = program(json!([
        var("a", Value::Null),
        var("b", Value::Null),
        expr(member(ident("a"), ident("b"), false)),
        expr(member(ident("a"), ident("b"), true)),
    ]));
    let tree = bind(&mut ast);
    let b_decl = ast.get(ast.identifiers_named("b")[0]).binding();
    assert_eq!(bindings_of(&ast, "b"), [b_decl, None, b_decl]);
    assert_eq!(the_binding(&tree, &ast, "a").references.len(), 3);
}

#[test]
fn test_host_global_members_bind_globally() {
    // function f(foo) { return window[foo]; }
    let mut ast = program(json!([function(
        "f",
        json!([ident("foo")]),
        json!([{
            "type": "ReturnStatement",
            "argument": member(ident("window"), ident("foo"), true)
        }])
    )]));
    let tree = bind(&mut ast);

    let foos = bindings_of(&ast, "foo");
    assert_ne!(foos[0], foos[1]);
    let inner = tree.binding(foos[1].unwrap()).unwrap();
    assert_eq!((inner.kind, inner.scope), (BindingKind::Var, ScopeId::GLOBAL));
    let window = the_binding(&tree, &ast, "window");
    assert_eq!(window.scope, ScopeId::GLOBAL);
}

#[test]
fn test_function_expression_self_reference() {
    // var f = function g() { g(); };
    let mut ast = program(json!([var(
        "f",
        json!({
            "type": "FunctionExpression",
            "id": ident("g"),
            "params": [],
            "body": { "type": "BlockStatement", "body": [expr(call(ident("g"), json!([])))] },
            "generator": false,
            "async": false
        })
    )]));
    let tree = bind(&mut ast);
    let g = the_binding(&tree, &ast, "g");
    assert_eq!(g.kind, BindingKind::Id);
    assert_ne!(g.scope, ScopeId::GLOBAL);
    assert_eq!(g.references.len(), 2);
}

#[test]
fn test_default_params_and_arrow_bodies() {
    // function f(a = b) {} var h = (c, ...d) => c;
    let mut ast = program(json!([
        function(
            "f",
            json!([{ "type": "AssignmentPattern", "left": ident("a"), "right": ident("b") }]),
            json!([])
        ),
        var(
            "h",
            json!({
                "type": "ArrowFunctionExpression",
                "id": null,
                "params": [ident("c"), { "type": "RestElement", "argument": ident("d") }],
                "body": ident("c"),
                "generator": false,
                "async": false,
                "expression": true
            })
        ),
    ]));
    let tree = bind(&mut ast);
    assert_eq!(the_binding(&tree, &ast, "a").kind, BindingKind::Param);
    let b = the_binding(&tree, &ast, "b");
    assert_eq!((b.kind, b.scope), (BindingKind::Var, ScopeId::GLOBAL));
    let c = the_binding(&tree, &ast, "c");
    assert_eq!((c.kind, c.references.len()), (BindingKind::Param, 2));
    assert_eq!(the_binding(&tree, &ast, "d").kind, BindingKind::Param);
}

#[test]
fn test_labels_are_not_bindings() {
    let mut ast = program(json!([{
        "type": "LabeledStatement",
        "label": ident("outer"),
        "body": {
            "type": "WhileStatement",
            "test": lit(json!(true)),
            "body": { "type": "BreakStatement", "label": ident("outer") }
        }
    }]));
    bind(&mut ast);
    assert_eq!(bindings_of(&ast, "outer"), [None::<BindingId>, None]);
}

#[test]
fn test_custom_host_globals() {
    // self.x; window.y;
    let mut ast = program(json!([
        expr(member(ident("self"), ident("x"), false)),
        expr(member(ident("window"), ident("y"), false)),
    ]));
    let options = ScopeOptions {
        host_globals: vec!["self".to_owned()],
    };
    let tree = bind_scopes(&mut ast, &options);
    assert_eq!(the_binding(&tree, &ast, "self").scope, ScopeId::GLOBAL);
    assert_eq!(the_binding(&tree, &ast, "window").scope, ScopeId::GLOBAL);
}

#[test]
fn test_rename_through_binder() {
    // function test(a) { var a = a; }  →  rename param to `param1`
    let mut ast = program(json!([function(
        "test",
        json!([ident("a")]),
        json!([var("a", ident("a"))])
    )]));
    let mut tree = bind(&mut ast);
    let param = ast.get(ast.identifiers_named("a")[0]).binding().unwrap();
    tree.rename(&mut ast, param, "param1").unwrap();

    assert!(ast.identifiers_named("a").is_empty());
    assert_eq!(ast.identifiers_named("param1").len(), 3);
    let scope = tree.scope(tree.binding(param).unwrap().scope);
    assert_eq!(scope.params.get("param1"), Some(&param));
    assert!(!scope.params.contains_key("a"));
}
