mod computed;
mod fixed;

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::key::TypeKey;
use crate::registration::Registration;
use crate::scope::Scope;

pub use computed::ComputedProvider;
pub use fixed::FixedProvider;

/// A factory producing objects of [`Instantiate::Output`] for a scope.
///
/// The scope passed in is the one the caller resolved from, which lets an
/// implementation consult the caller's effective registrations of other types.
///
/// This trait is sealed. It is implemented by [`FixedProvider`],
/// [`ComputedProvider`] and [`Provider`] only, since scopes and registries
/// recognise nothing but a [`Provider`] when resolving. Custom construction
/// logic goes into [`Provider::computed`] instead.
pub trait Instantiate: sealed::Sealed + Send + Sync + 'static {
    /// The type of objects produced. May be a trait object.
    type Output: ?Sized + Send + Sync + 'static;

    /// Produces an object on behalf of `scope`.
    fn instantiate(&self, scope: &Scope) -> Arc<Self::Output>;
}

/// The typed capability of a [`Registration`]: producing objects of type `T`.
///
/// A [`Provider`] is either a [`FixedProvider`] returning one prebuilt
/// instance, or a [`ComputedProvider`] running a closure per request. Scopes
/// and selection registries only store [`Provider`]s behind the erased
/// [`Registration`] interface and recover them with a checked downcast
/// keyed by `T`.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dynascope::prelude::*;
/// let scope = Scope::new();
/// scope.set(Provider::fixed(Arc::new(String::from("root"))));
/// scope.set(Provider::computed(|current: &Scope| {
///     let name = current.get::<String>().unwrap_or_default();
///     Arc::new(name.len())
/// }));
///
/// assert_eq!(*scope.get::<usize>().unwrap(), 4);
/// ```
pub enum Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    Fixed(FixedProvider<T>),
    Computed(ComputedProvider<T>),
}

impl<T> Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// Creates a provider always returning `instance`.
    pub fn fixed(instance: Arc<T>) -> Self {
        Self::Fixed(FixedProvider::new(instance))
    }

    /// Creates a provider running `build` with the requesting scope on every
    /// request.
    pub fn computed<F>(build: F) -> Self
    where
        F: Fn(&Scope) -> Arc<T> + Send + Sync + 'static,
    {
        Self::Computed(ComputedProvider::new(build))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl<T> Provider<T>
where
    T: Default + Send + Sync + 'static,
{
    /// Creates a provider building a fresh `T::default()` on every request.
    pub fn default_factory() -> Self {
        Self::Computed(ComputedProvider::from_default())
    }
}

mod sealed {
    use super::{ComputedProvider, FixedProvider, Provider};

    pub trait Sealed {}

    impl<T: ?Sized + Send + Sync + 'static> Sealed for FixedProvider<T> {}

    impl<T: ?Sized + Send + Sync + 'static> Sealed for ComputedProvider<T> {}

    impl<T: ?Sized + Send + Sync + 'static> Sealed for Provider<T> {}
}

impl<T> Instantiate for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    type Output = T;

    fn instantiate(&self, scope: &Scope) -> Arc<Self::Output> {
        match self {
            Self::Fixed(provider) => provider.instantiate(scope),
            Self::Computed(provider) => provider.instantiate(scope),
        }
    }
}

impl<T> Registration for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

impl<T> Debug for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Fixed(provider) => f.debug_tuple("Fixed").field(provider).finish(),
            Self::Computed(provider) => f.debug_tuple("Computed").field(provider).finish(),
        }
    }
}

impl<T> From<FixedProvider<T>> for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn from(provider: FixedProvider<T>) -> Self {
        Self::Fixed(provider)
    }
}

impl<T> From<ComputedProvider<T>> for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn from(provider: ComputedProvider<T>) -> Self {
        Self::Computed(provider)
    }
}

/// Shorthand for [`Provider::fixed`].
pub fn singleton<T>(instance: Arc<T>) -> Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    Provider::fixed(instance)
}

/// Shorthand for [`Provider::computed`].
pub fn factory<T, F>(build: F) -> Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&Scope) -> Arc<T> + Send + Sync + 'static,
{
    Provider::computed(build)
}

/// Shorthand for [`Provider::default_factory`].
pub fn default_factory<T>() -> Provider<T>
where
    T: Default + Send + Sync + 'static,
{
    Provider::default_factory()
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct Square;

    impl Shape for Square {
        fn name(&self) -> &'static str {
            "square"
        }
    }

    #[test]
    fn provider_type_key_succeeds() {
        assert_eq!(
            Provider::fixed(Arc::new(1i32)).type_key(),
            TypeKey::of::<i32>()
        );
        assert_eq!(
            Provider::<dyn Shape>::fixed(Arc::new(Square)).type_key(),
            TypeKey::of::<dyn Shape>()
        );
        assert_ne!(
            Provider::<dyn Shape>::fixed(Arc::new(Square)).type_key(),
            TypeKey::of::<Square>()
        );
    }

    #[test]
    fn provider_dispatches_to_variant() {
        let scope = Scope::new();
        let fixed = singleton(Arc::new(String::from("fixed")));
        let computed = factory(|_: &Scope| Arc::new(String::from("computed")));

        assert!(fixed.is_fixed());
        assert!(computed.is_computed());
        assert_eq!(*fixed.instantiate(&scope), "fixed");
        assert_eq!(*computed.instantiate(&scope), "computed");
    }

    #[test]
    fn provider_serves_trait_objects() {
        let scope = Scope::new();
        let provider: Provider<dyn Shape> =
            factory(|_: &Scope| -> Arc<dyn Shape> { Arc::new(Square) });

        assert_eq!(provider.instantiate(&scope).name(), "square");
    }

    #[test]
    fn default_factory_succeeds() {
        let scope = Scope::new();
        let provider = default_factory::<String>();

        assert!(provider.is_computed());
        assert_eq!(*provider.instantiate(&scope), "");
    }

    #[test]
    fn provider_debug_hides_contents() {
        let provider = Provider::fixed(Arc::new(1i32));
        assert_eq!(format!("{provider:?}"), "Fixed(FixedProvider<T> { .. })");
    }

    fn instantiate_with<P: Instantiate>(provider: &P, scope: &Scope) -> Arc<P::Output> {
        provider.instantiate(scope)
    }

    #[test]
    fn instantiate_is_implemented_by_every_variant() {
        let scope = Scope::new();
        let fixed = FixedProvider::new(Arc::new(1i32));
        let computed = ComputedProvider::new(|_: &Scope| Arc::new(2i32));

        assert_eq!(*instantiate_with(&fixed, &scope), 1);
        assert_eq!(*instantiate_with(&computed, &scope), 2);
        assert_eq!(*instantiate_with(&Provider::from(fixed), &scope), 1);
        assert_eq!(*instantiate_with(&Provider::from(computed), &scope), 2);
    }
}
