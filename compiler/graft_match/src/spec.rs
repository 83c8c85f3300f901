//! The JSON form of match sequences.
//!
//! ```json
//! {
//!   "name": "rename-param",
//!   "cases": [{ "depth": 2, "pattern": { "type": "Identifier", "name": "a" } }],
//!   "action": { "rename": [{ "name": "param1" }] }
//! }
//! ```
//!
//! A case may give an `example` tree (plus an optional `extract` path) instead
//! of a `pattern`; see [`Pattern::from_example`].
//!
//! Older files spell `cases` as `tests`, `pattern` as `ast-subtree`, and put
//! `renames` / `patches` at the top level instead of under `action`. Both
//! spellings load.

use graft_patterns::Pattern;
use serde::Deserialize;
use serde_json::Value;

use crate::MatchError;

/// One sequence as written in a spec file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SequenceSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "tests")]
    pub cases: Vec<CaseSpec>,
    #[serde(default)]
    pub action: Option<ActionSpec>,
    #[serde(default)]
    pub renames: Option<Vec<RenameInstruction>>,
    #[serde(default)]
    pub patches: Option<Vec<PatchInstruction>>,
}

/// One case. Exactly one of `pattern` and `example` must be given.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CaseSpec {
    pub depth: u32,
    #[serde(default, alias = "ast-subtree")]
    pub pattern: Option<Pattern>,
    /// Example code (ESTree) to derive the pattern from.
    #[serde(default)]
    pub example: Option<Value>,
    /// Dotted path to the part of `example` to use.
    #[serde(default)]
    pub extract: Option<String>,
}

/// What to do once every case matched.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSpec {
    #[serde(alias = "renames")]
    Rename(Vec<RenameInstruction>),
    #[serde(alias = "patch")]
    Patches(Vec<PatchInstruction>),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RenameInstruction {
    /// Dotted field path from the base node to the identifier to rename.
    #[serde(default)]
    pub path: Option<String>,
    pub name: String,
    /// Index into the captured nodes of the base node. Defaults to the last.
    #[serde(default, rename = "matchedNodeRef", alias = "matched_node_ref")]
    pub matched_node_ref: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PatchInstruction {
    #[serde(rename = "type")]
    pub kind: PatchKind,
    /// ESTree code: one node, an array of nodes, or nothing (`REMOVE`).
    #[serde(default)]
    pub code: Value,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatchKind {
    Remove,
    Replace,
    InsertBefore,
    InsertAfter,
}

impl PatchInstruction {
    /// The code as a list of node objects.
    pub fn code_nodes(&self) -> &[Value] {
        match &self.code {
            Value::Null => &[],
            Value::Array(items) => items,
            single => std::slice::from_ref(single),
        }
    }
}

impl CaseSpec {
    /// The case's pattern, deriving it from `example` if needed.
    pub fn resolve_pattern(self, sequence: &str, index: usize) -> Result<Pattern, MatchError> {
        let invalid = || MatchError::CasePattern {
            name: sequence.to_owned(),
            index,
        };
        match (self.pattern, self.example) {
            (Some(pattern), None) => Ok(pattern),
            (None, Some(example)) => {
                Pattern::from_example_json(&example, self.extract.as_deref())?.ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl SequenceSpec {
    /// The action, wherever the file put it. `None` means match-only.
    pub fn resolved_action(&self, name: &str) -> Result<Option<ActionSpec>, MatchError> {
        let legacy_renames = self.renames.clone().map(ActionSpec::Rename);
        let legacy_patches = self.patches.clone().map(ActionSpec::Patches);
        let mut found = [self.action.clone(), legacy_renames, legacy_patches]
            .into_iter()
            .flatten();
        let action = found.next();
        if found.next().is_some() {
            return Err(MatchError::MultipleActions { name: name.to_owned() });
        }
        Ok(action)
    }
}

/// Parse a spec file: one sequence object or an array of them.
pub fn parse_specs(value: &Value) -> Result<Vec<SequenceSpec>, MatchError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| SequenceSpec::deserialize(item).map_err(MatchError::from))
            .collect(),
        single => Ok(vec![SequenceSpec::deserialize(single)?]),
    }
}
