//! Node storage and slot descriptors.

use serde_json::Value;

use crate::{BindingId, FieldDef, FieldShape, NodeId, NodeType, Span};

/// Content of one schema field.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// Scalar property. `None` when the property was absent from the source.
    Value(Option<Value>),
    /// Single child slot (`Node` or `OptNode` shape).
    Node(Option<NodeId>),
    /// List slot. `None` elements are holes (`[a, , b]`).
    List(Vec<Option<NodeId>>),
}

impl Field {
    fn empty(shape: FieldShape) -> Self {
        match shape {
            FieldShape::Value => Field::Value(None),
            FieldShape::Node | FieldShape::OptNode => Field::Node(None),
            FieldShape::List => Field::List(Vec::new()),
        }
    }
}

/// A syntax tree node.
///
/// `fields` is aligned with `ty.fields()`: the i-th entry holds the i-th
/// schema field. Accessors take the ESTree property name.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    ty: NodeType,
    span: Option<Span>,
    fields: Vec<Field>,
    binding: Option<BindingId>,
}

impl Node {
    /// Create a node with every field empty.
    pub fn new(ty: NodeType) -> Self {
        Node {
            ty,
            span: None,
            fields: ty.fields().iter().map(|def| Field::empty(def.shape)).collect(),
            binding: None,
        }
    }

    /// Create an `Identifier` node.
    pub fn identifier(name: &str) -> Self {
        let mut node = Node::new(NodeType::Identifier);
        node.set_value("name", Value::String(name.to_owned()));
        node
    }

    #[inline]
    pub fn ty(&self) -> NodeType {
        self.ty
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    #[inline]
    pub fn set_span(&mut self, span: Option<Span>) {
        self.span = span;
    }

    /// Binding this node was resolved to by the scope binder.
    #[inline]
    pub fn binding(&self) -> Option<BindingId> {
        self.binding
    }

    #[inline]
    pub fn set_binding(&mut self, binding: Option<BindingId>) {
        self.binding = binding;
    }

    /// Schema entries paired with their content.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDef, &Field)> + '_ {
        self.ty.fields().iter().zip(&self.fields)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.ty.field_index(name).and_then(|i| self.fields.get(i))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.ty.field_index(name).and_then(|i| self.fields.get_mut(i))
    }

    /// Scalar property, if the field exists and was present.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.field(name) {
            Some(Field::Value(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// Set a scalar property. Returns `false` if the kind has no such scalar.
    pub fn set_value(&mut self, name: &str, value: Value) -> bool {
        match self.field_mut(name) {
            Some(Field::Value(slot)) => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Single child in a `Node`/`OptNode` field.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match self.field(name) {
            Some(Field::Node(child)) => *child,
            _ => None,
        }
    }

    /// Set a single-child field. Returns `false` if the field is not one.
    pub fn set_child(&mut self, name: &str, child: Option<NodeId>) -> bool {
        match self.field_mut(name) {
            Some(Field::Node(slot)) => {
                *slot = child;
                true
            }
            _ => false,
        }
    }

    /// Elements of a list field; empty if the field is not a list.
    pub fn children(&self, name: &str) -> &[Option<NodeId>] {
        match self.field(name) {
            Some(Field::List(items)) => items,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self, name: &str) -> Option<&mut Vec<Option<NodeId>>> {
        match self.field_mut(name) {
            Some(Field::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Every child id in traversal order, skipping holes and empty slots.
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.fields.iter().flat_map(|field| {
            let (single, list): (Option<NodeId>, &[Option<NodeId>]) = match field {
                Field::Value(_) => (None, &[]),
                Field::Node(child) => (*child, &[]),
                Field::List(items) => (None, items.as_slice()),
            };
            single.into_iter().chain(list.iter().flatten().copied())
        })
    }

    /// Identifier name. `None` for every other kind.
    pub fn name(&self) -> Option<&str> {
        if self.ty != NodeType::Identifier {
            return None;
        }
        self.value("name").and_then(Value::as_str)
    }

    /// Rename an identifier. No-op on other kinds.
    pub fn set_name(&mut self, name: &str) {
        if self.ty == NodeType::Identifier {
            self.set_value("name", Value::String(name.to_owned()));
        }
    }

    /// `computed` flag of member expressions, properties and methods.
    pub fn is_computed(&self) -> bool {
        matches!(self.value("computed"), Some(Value::Bool(true)))
    }
}

/// Where a node sits inside its parent: a field name plus, for list fields,
/// the element index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub field: &'static str,
    pub index: Option<usize>,
}

impl Slot {
    /// A single-child slot.
    #[inline]
    pub const fn field(field: &'static str) -> Self {
        Slot { field, index: None }
    }

    /// An element of a list slot.
    #[inline]
    pub const fn element(field: &'static str, index: usize) -> Self {
        Slot {
            field,
            index: Some(index),
        }
    }
}
