//! The pattern model and its JSON form.

use graft_ir::{ensure_sufficient_stack, json_kind, FieldShape, NodeType};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::PatternError;

/// A partial node.
///
/// `fields` holds only the constrained fields, in schema order. Names are
/// the schema's own `&'static str`s, so a pattern can never name a field the
/// kind does not have.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub(crate) ty: NodeType,
    pub(crate) fields: Vec<(&'static str, PatternField)>,
}

/// Constraint on one field.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternField {
    /// Scalar that must be equal. An absent candidate scalar counts as `null`.
    Value(Value),
    /// Child that must match; `None` requires the slot to be empty.
    Node(Option<Box<Pattern>>),
    /// Constrained list elements as `(index, pattern)`, sorted by index.
    /// Unlisted indices are wildcards; a `None` pattern requires a hole.
    List(Vec<(usize, Option<Pattern>)>),
}

impl Pattern {
    /// A pattern matching every node of kind `ty`.
    pub fn new(ty: NodeType) -> Self {
        Pattern {
            ty,
            fields: Vec::new(),
        }
    }

    #[inline]
    pub fn ty(&self) -> NodeType {
        self.ty
    }

    #[inline]
    pub fn fields(&self) -> &[(&'static str, PatternField)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&PatternField> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    /// Constrain `name`, replacing any earlier constraint on it. A name the
    /// kind does not have is ignored.
    pub fn with(mut self, name: &str, field: PatternField) -> Self {
        if let Some(def) = self.ty.field(name) {
            self.fields.retain(|(n, _)| *n != def.name);
            self.fields.push((def.name, field));
            let ty = self.ty;
            self.fields
                .sort_by_key(|(n, _)| ty.field_index(n).unwrap_or(usize::MAX));
        }
        self
    }

    /// Parse a pattern from its JSON form: an ESTree-shaped object with a
    /// `type` and any subset of the kind's fields.
    ///
    /// List fields are either arrays or objects keyed by element index
    /// (`{"2": {...}}`) for sparse constraints. Properties the kind does not
    /// have are ignored.
    pub fn from_json(value: &Value) -> Result<Pattern, PatternError> {
        let Value::Object(object) = value else {
            return Err(PatternError::NotAnObject {
                found: json_kind(value),
            });
        };
        let ty_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(PatternError::MissingType)?;
        let ty = NodeType::from_name(ty_name)
            .ok_or_else(|| PatternError::UnknownNodeType(ty_name.to_owned()))?;

        let mut fields = Vec::new();
        for def in ty.fields() {
            let Some(raw) = object.get(def.name) else {
                continue;
            };
            let field = match def.shape {
                FieldShape::Value => PatternField::Value(raw.clone()),
                FieldShape::Node | FieldShape::OptNode => {
                    PatternField::Node(parse_optional(raw)?.map(Box::new))
                }
                FieldShape::List => PatternField::List(parse_list(ty, def.name, raw)?),
            };
            fields.push((def.name, field));
        }
        Ok(Pattern { ty, fields })
    }

    /// JSON form. Dense lists are written as arrays, sparse ones as objects
    /// keyed by index.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_owned(), Value::String(self.ty.name().to_owned()));
        for (name, field) in &self.fields {
            let value = match field {
                PatternField::Value(value) => value.clone(),
                PatternField::Node(child) => child.as_ref().map_or(Value::Null, |p| p.to_json()),
                PatternField::List(elements) => list_to_json(elements),
            };
            object.insert((*name).to_owned(), value);
        }
        Value::Object(object)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Pattern::from_json(&value).map_err(serde::de::Error::custom)
    }
}

fn parse_optional(value: &Value) -> Result<Option<Pattern>, PatternError> {
    if value.is_null() {
        Ok(None)
    } else {
        ensure_sufficient_stack(|| Pattern::from_json(value)).map(Some)
    }
}

fn parse_list(
    ty: NodeType,
    field: &'static str,
    value: &Value,
) -> Result<Vec<(usize, Option<Pattern>)>, PatternError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| -> Result<_, PatternError> { Ok((index, parse_optional(item)?)) })
            .collect(),
        Value::Object(entries) => {
            let mut elements = entries
                .iter()
                .map(|(key, item)| -> Result<_, PatternError> {
                    let index = key.parse::<usize>().map_err(|_| PatternError::BadListIndex {
                        ty: ty.name(),
                        field,
                        key: key.clone(),
                    })?;
                    Ok((index, parse_optional(item)?))
                })
                .collect::<Result<Vec<_>, PatternError>>()?;
            elements.sort_by_key(|(index, _)| *index);
            Ok(elements)
        }
        _ => Err(PatternError::ExpectedList {
            ty: ty.name(),
            field,
        }),
    }
}

fn list_to_json(elements: &[(usize, Option<Pattern>)]) -> Value {
    let dense = elements.iter().enumerate().all(|(i, (index, _))| i == *index);
    let element = |p: &Option<Pattern>| p.as_ref().map_or(Value::Null, Pattern::to_json);
    if dense {
        Value::Array(elements.iter().map(|(_, p)| element(p)).collect())
    } else {
        Value::Object(
            elements
                .iter()
                .map(|(index, p)| (index.to_string(), element(p)))
                .collect(),
        )
    }
}
