//! Graft driver.
//!
//! Ties the engine together: import an ESTree tree, bind its scopes, run
//! every match sequence over it in one walk, and hand the rewritten tree
//! back. [`rewrite_estree`] is the whole pipeline on JSON values;
//! [`rewrite_modules`] runs it over many independent modules in parallel.

mod batch;
mod errors;
mod options;
mod report;
mod rewrite;
mod tracing_setup;

pub use batch::{rewrite_modules, ModuleJob, ModuleOutput};
pub use errors::RewriteError;
pub use options::RewriteOptions;
pub use report::{CapturedNode, FiredSequence, RewriteReport};
pub use rewrite::{rewrite, rewrite_estree};
pub use tracing_setup::init_tracing;
