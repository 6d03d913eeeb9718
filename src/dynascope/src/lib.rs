//! Hierarchical, type-indexed object resolution.
//!
//! A [`Scope`](scope::Scope) tree maps types to [`Provider`](provider::Provider)s.
//! Asking a scope for a type walks from that scope towards the root and uses
//! the nearest definition, so descendants can shadow what their ancestors
//! define. Computed providers receive the scope the request started from,
//! letting an object registered near the root adapt to the overrides of the
//! descendant asking for it.
//!
//! A [`SelectionRegistry`](selection::SelectionRegistry) complements the tree
//! with named alternatives per type, to be picked by string key (typically
//! from configuration) and installed into a scope.

pub mod key;
pub mod provider;
pub mod registration;
pub mod scope;
pub mod selection;
mod util;

#[doc(hidden)]
pub mod __private {
    pub use linkme;
}

pub mod prelude {
    pub use crate::export;
    pub use crate::key::TypeKey;
    pub use crate::provider::{
        default_factory, factory, singleton, ComputedProvider, FixedProvider, Instantiate,
        Provider,
    };
    pub use crate::registration::Registration;
    pub use crate::scope::{ResolveError, Scope};
    pub use crate::selection::{Export, SelectError, SelectionRegistry};
}
