use graft_scope::ScopeOptions;
use serde::Deserialize;

/// Settings for one rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Build the scope tree before matching. Renames are skipped without it.
    pub bind_scopes: bool,
    /// Skip subtrees deeper than any waiting case.
    pub prune: bool,
    pub scope: ScopeOptions,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            bind_scopes: true,
            prune: true,
            scope: ScopeOptions::default(),
        }
    }
}
