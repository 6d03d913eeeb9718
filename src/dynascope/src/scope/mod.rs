mod inner;

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

use crate::key::TypeKey;
use crate::provider::{Instantiate, Provider};
use crate::registration::Registration;
use crate::util::any::DowncastRef;

use self::inner::ScopeCore;

/// A node in a tree of scopes holding type-keyed registrations.
///
/// A [`Scope`] is a cheap handle; clones refer to the same node. Each node
/// keeps at most one registration per type, which once defined is never
/// replaced in place. A descendant may define the same type again, shadowing
/// its ancestors for requests issued against the descendant and its own
/// subtree.
///
/// Lookups start at the scope they are issued against and walk towards the
/// root, so the nearest definition wins. Providers found on the way are always
/// handed the scope the request started from.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dynascope::prelude::*;
/// struct Greeting(String);
///
/// let root = Scope::new();
/// let child = root.child();
///
/// root.set(Provider::fixed(Arc::new(String::from("root"))));
/// root.set(Provider::computed(|current: &Scope| {
///     let name = current.get::<String>().unwrap_or_default();
///     Arc::new(Greeting(format!("Hello, {name}")))
/// }));
/// child.set(Provider::fixed(Arc::new(String::from("child"))));
///
/// // The greeting is only defined in `root`, but it is built against the
/// // scope it was requested from.
/// assert_eq!(root.get::<Greeting>().unwrap().0, "Hello, root");
/// assert_eq!(child.get::<Greeting>().unwrap().0, "Hello, child");
/// ```
#[derive(Clone)]
pub struct Scope {
    core: Arc<ScopeCore>,
}

impl Scope {
    /// Creates a root scope without any registration.
    pub fn new() -> Self {
        Self {
            core: Arc::new(ScopeCore::new_root()),
        }
    }

    /// Creates an empty scope whose lookups fall back to `parent`.
    pub fn with_parent(parent: &Scope) -> Self {
        Self {
            core: Arc::new(ScopeCore::new_sub(Arc::clone(&parent.core))),
        }
    }

    /// Creates an empty child of `self`.
    pub fn child(&self) -> Self {
        Self::with_parent(self)
    }

    pub fn parent(&self) -> Option<Scope> {
        self.core.parent().map(|core| Self {
            core: Arc::clone(core),
        })
    }

    /// Returns the number of ancestors of this scope.
    pub fn depth(&self) -> usize {
        self.core.depth()
    }

    /// Returns true if both handles refer to the same scope.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.core, &other.core)
    }

    /// Installs `registration` in this scope.
    ///
    /// Returns false and leaves the scope untouched if this scope already
    /// holds a registration for the same type. Ancestors and descendants are
    /// never affected.
    pub fn define(&self, registration: Arc<dyn Registration>) -> bool {
        self.core.define(registration)
    }

    /// Installs `registration` in this scope. See [`Scope::define`].
    pub fn set<R>(&self, registration: R) -> bool
    where
        R: Registration,
    {
        self.define(Arc::new(registration))
    }

    /// Finds the registration for `key` in this scope or its nearest ancestor.
    pub fn resolve(&self, key: TypeKey) -> Option<Arc<dyn Registration>> {
        self.core.resolve(key)
    }

    /// Returns true if this very scope, not counting ancestors, holds a
    /// registration for `key`.
    pub fn is_defined_locally(&self, key: TypeKey) -> bool {
        self.core.is_defined_locally(key)
    }

    /// Returns an object of type `T` if any scope along the chain provides
    /// one.
    ///
    /// # Panics
    ///
    /// Panics if the registration found for `T` is not a [`Provider<T>`],
    /// which only happens if a custom [`Registration`] reports a type key it
    /// can't serve.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.require::<T>() {
            Ok(object) => Some(object),
            Err(ResolveError::NotFound { .. }) => None,
            Err(err) => unreachable!("{err}"),
        }
    }

    /// Returns an object of type `T`, reporting why none could be produced.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if no scope along the chain defines
    /// `T`, or [`ResolveError::TypeMismatch`] if the registration found is not
    /// a [`Provider<T>`].
    pub fn require<T>(&self) -> Result<Arc<T>, ResolveError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let registration = self.resolve(key).context(NotFoundSnafu { key })?;
        let provider = registration
            .downcast_ref::<Provider<T>>()
            .context(TypeMismatchSnafu {
                key,
                found: registration.concrete_type_name(),
            })?;
        Ok(provider.instantiate(self))
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Scope")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ResolveError {
    #[snafu(display("could not find a registration for {key} along the scope chain"))]
    #[non_exhaustive]
    NotFound { key: TypeKey },
    #[snafu(display("the registration for {key} is a {found}, not a provider of it"))]
    #[non_exhaustive]
    TypeMismatch { key: TypeKey, found: &'static str },
}
