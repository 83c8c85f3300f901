//! ESTree JSON import and export.
//!
//! This is the boundary with the external parser (acorn-compatible output
//! in) and code generator (ESTree out). Only the properties named by a
//! kind's schema are kept, plus `start`/`end` as the span. Everything else
//! (`loc`, `range`, parser-specific extras) is dropped on import.

use serde_json::{Map, Value};

use crate::{ensure_sufficient_stack, Ast, Field, FieldShape, IrError, Node, NodeId, NodeType, Span};

impl Ast {
    /// Import a whole tree. The imported object becomes the root.
    pub fn from_estree(value: &Value) -> Result<Ast, IrError> {
        let mut ast = Ast {
            nodes: Vec::new(),
            root: NodeId::new(0),
        };
        let root = ast.import(value)?;
        ast.set_root(root);
        Ok(ast)
    }

    /// Check that `value` would import, without keeping the result.
    pub fn validate_estree(value: &Value) -> Result<(), IrError> {
        Ast::from_estree(value).map(|_| ())
    }

    /// Import a detached subtree into this arena and return its root.
    pub fn import(&mut self, value: &Value) -> Result<NodeId, IrError> {
        ensure_sufficient_stack(|| self.import_node(value))
    }

    fn import_node(&mut self, value: &Value) -> Result<NodeId, IrError> {
        let Value::Object(object) = value else {
            return Err(IrError::NotANode {
                found: json_kind(value),
            });
        };
        let ty_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(IrError::MissingType)?;
        let ty = NodeType::from_name(ty_name)
            .ok_or_else(|| IrError::UnknownNodeType(ty_name.to_owned()))?;

        let id = self.alloc(Node::new(ty));
        self.get_mut(id).set_span(span_of(object));

        for def in ty.fields() {
            let Some(raw) = object.get(def.name) else {
                continue;
            };
            match def.shape {
                FieldShape::Value => {
                    self.get_mut(id).set_value(def.name, raw.clone());
                }
                FieldShape::Node | FieldShape::OptNode => {
                    let child = self.import_optional(raw)?;
                    self.get_mut(id).set_child(def.name, child);
                }
                FieldShape::List => {
                    let Value::Array(items) = raw else {
                        return Err(IrError::ExpectedList {
                            ty: ty.name(),
                            field: def.name,
                        });
                    };
                    let mut children = Vec::with_capacity(items.len());
                    for item in items {
                        children.push(self.import_optional(item)?);
                    }
                    if let Some(slot) = self.get_mut(id).children_mut(def.name) {
                        *slot = children;
                    }
                }
            }
        }
        Ok(id)
    }

    fn import_optional(&mut self, value: &Value) -> Result<Option<NodeId>, IrError> {
        if value.is_null() {
            Ok(None)
        } else {
            self.import(value).map(Some)
        }
    }

    /// Export the tree reachable from the root.
    pub fn to_estree(&self) -> Value {
        self.export(self.root())
    }

    /// Export the subtree rooted at `id`.
    pub fn export(&self, id: NodeId) -> Value {
        ensure_sufficient_stack(|| self.export_node(id))
    }

    fn export_node(&self, id: NodeId) -> Value {
        let node = self.get(id);
        let mut object = Map::new();
        object.insert("type".to_owned(), Value::String(node.ty().name().to_owned()));
        if let Some(span) = node.span() {
            object.insert("start".to_owned(), Value::from(span.start));
            object.insert("end".to_owned(), Value::from(span.end));
        }
        for (def, field) in node.fields() {
            let value = match field {
                Field::Value(None) => continue,
                Field::Value(Some(value)) => value.clone(),
                Field::Node(child) => self.export_optional(*child),
                Field::List(items) => {
                    Value::Array(items.iter().map(|item| self.export_optional(*item)).collect())
                }
            };
            object.insert(def.name.to_owned(), value);
        }
        Value::Object(object)
    }

    fn export_optional(&self, id: Option<NodeId>) -> Value {
        id.map_or(Value::Null, |id| self.export(id))
    }
}

fn span_of(object: &Map<String, Value>) -> Option<Span> {
    let offset = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    };
    Some(Span::new(offset("start")?, offset("end")?))
}

/// Article-prefixed JSON kind of `value`, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
