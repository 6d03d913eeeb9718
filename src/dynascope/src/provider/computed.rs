use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::provider::Instantiate;
use crate::scope::Scope;

type Build<T> = dyn Fn(&Scope) -> Arc<T> + Send + Sync;

/// A provider which runs a closure on every request.
///
/// The closure receives the scope the request was issued against, which is
/// not necessarily the scope the provider was registered in. It may look up
/// other objects from that scope, so a provider registered near the root
/// still sees the overrides of the descendant that asked for it.
///
/// Nothing is cached: each request runs the closure again.
pub struct ComputedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    build: Box<Build<T>>,
}

impl<T> ComputedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&Scope) -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }
}

impl<T> ComputedProvider<T>
where
    T: Default + Send + Sync + 'static,
{
    /// Creates a provider building a fresh `T::default()` per request.
    pub fn from_default() -> Self {
        Self::new(|_| Arc::new(T::default()))
    }
}

impl<T> Debug for ComputedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComputedProvider<T>").finish_non_exhaustive()
    }
}

impl<T> Instantiate for ComputedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    type Output = T;

    fn instantiate(&self, scope: &Scope) -> Arc<Self::Output> {
        (self.build)(scope)
    }
}
