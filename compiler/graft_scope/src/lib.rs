//! Scope construction and identifier binding.
//!
//! [`bind_scopes`] walks a tree once and records, for every identifier that
//! names a variable, which [`Binding`] it refers to. Bindings live in a
//! [`ScopeTree`] and keep the list of nodes referencing them, so a binding
//! can be renamed as a whole with [`ScopeTree::rename`] long after its scope
//! was left.
//!
//! Resolution follows function scoping: `Program` opens the global scope,
//! every function opens a function scope, declarations are hoisted, and
//! names still unknown when the walk ends become implicit globals.

mod binder;
mod errors;
mod scope;

pub use binder::{bind_scopes, ScopeBinder, ScopeOptions};
pub use errors::ScopeError;
pub use scope::{Binding, BindingKind, Scope, ScopeId, ScopeKind, ScopeTree};
