//! The single-tree pipeline.

use graft_ir::Ast;
use graft_match::{parse_specs, run_matches, MatchRegistry, SequenceSpec};
use graft_scope::bind_scopes;
use serde_json::Value;
use tracing::debug;

use crate::{RewriteError, RewriteOptions, RewriteReport};

/// Run `specs` over `ast` in place.
///
/// Every spec is validated before the tree is touched, so a load error
/// leaves `ast` as it was.
#[tracing::instrument(level = "debug", skip_all, fields(sequences = specs.len(), nodes = ast.len()))]
pub fn rewrite(ast: &mut Ast, specs: Vec<SequenceSpec>, options: &RewriteOptions) -> Result<RewriteReport, RewriteError> {
    let mut registry = MatchRegistry::from_specs(specs)?;
    let mut scopes = options.bind_scopes.then(|| bind_scopes(ast, &options.scope));
    run_matches(ast, &mut registry, scopes.as_mut(), options.prune)?;

    let report = registry.into_report();
    debug!(
        fired = report.completed.len(),
        unfinished = report.unfinished.len(),
        "rewrite finished"
    );
    Ok(RewriteReport::new(ast, report))
}

/// Import `tree`, rewrite it with the sequences in `specs` and export the
/// result. `tree` itself is never modified.
pub fn rewrite_estree(
    tree: &Value,
    specs: &Value,
    options: &RewriteOptions,
) -> Result<(Value, RewriteReport), RewriteError> {
    let specs = parse_specs(specs)?;
    let mut ast = Ast::from_estree(tree)?;
    let report = rewrite(&mut ast, specs, options)?;
    Ok((ast.to_estree(), report))
}
