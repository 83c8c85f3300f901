//! Rewriting many modules at once.

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info_span, warn};

use crate::{rewrite_estree, RewriteError, RewriteOptions, RewriteReport};

/// One module to rewrite: its tree and the sequences to run over it.
#[derive(Clone, Debug, Deserialize)]
pub struct ModuleJob {
    pub name: String,
    pub tree: Value,
    pub specs: Value,
}

#[derive(Debug)]
pub struct ModuleOutput {
    pub name: String,
    pub result: Result<(Value, RewriteReport), RewriteError>,
}

/// Rewrite every job independently. Outputs come back in job order; one
/// module failing does not affect the others.
pub fn rewrite_modules(jobs: &[ModuleJob], options: &RewriteOptions) -> Vec<ModuleOutput> {
    let run = |job: &ModuleJob| {
        let _span = info_span!("module", name = %job.name).entered();
        ModuleOutput {
            name: job.name.clone(),
            result: rewrite_estree(&job.tree, &job.specs, options),
        }
    };

    // Scoped pool: torn down before returning, no global-pool atexit hangs.
    rayon::ThreadPoolBuilder::new()
        .stack_size(16 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| jobs.par_iter().map(&run).collect::<Vec<_>>())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), running sequentially");
            jobs.iter().map(&run).collect()
        })
}
