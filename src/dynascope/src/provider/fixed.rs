use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::provider::Instantiate;
use crate::scope::Scope;

/// A provider holding one instance, built before registration.
///
/// Every request receives the same shared instance, no matter which scope
/// the request comes from.
pub struct FixedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance: Arc<T>,
}

impl<T> FixedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub fn new(instance: Arc<T>) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &Arc<T> {
        &self.instance
    }
}

impl<T> Debug for FixedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FixedProvider<T>").finish_non_exhaustive()
    }
}

impl<T> Instantiate for FixedProvider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    type Output = T;

    fn instantiate(&self, _scope: &Scope) -> Arc<Self::Output> {
        Arc::clone(&self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_provider_ignores_scope() {
        let provider = FixedProvider::new(Arc::new(42));
        let root = Scope::new();
        let child = root.child();

        let a = provider.instantiate(&root);
        let b = provider.instantiate(&child);
        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, provider.instance()));
    }
}
