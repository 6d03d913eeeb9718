mod cluster;
mod export;

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use snafu::prelude::*;
use tracing::{debug, trace};

use crate::key::TypeKey;
use crate::provider::Provider;
use crate::registration::Registration;
use crate::scope::Scope;
use crate::util::any::Downcast;

use self::cluster::ClusterMap;

pub use export::{Export, ExportEntry, EXPORTS};

static GLOBAL: Lazy<SelectionRegistry> = Lazy::new(SelectionRegistry::from_exports);

/// A registry of named alternative registrations per type.
///
/// Where a [`Scope`] holds at most one registration per type, a
/// [`SelectionRegistry`] keeps any number of them, each under its own string
/// key. It exists to bootstrap configuration: a front end maps a value such as
/// `--storage=memory` to [`SelectionRegistry::select`], which copies the chosen
/// registration into a scope.
///
/// Within one type a key can be taken only once; the first registration wins.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dynascope::prelude::*;
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// let options = SelectionRegistry::new();
/// options.set("quiet", Provider::fixed(Arc::new(Level(0))));
/// options.set("verbose", Provider::fixed(Arc::new(Level(2))));
///
/// let scope = Scope::new();
/// assert!(!options.select::<Level>(&scope, "loud"));
/// assert!(options.select::<Level>(&scope, "verbose"));
/// assert_eq!(*scope.get::<Level>().unwrap(), Level(2));
/// ```
pub struct SelectionRegistry {
    clusters: Mutex<ClusterMap>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self {
            clusters: Mutex::new(ClusterMap::new()),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// The registry is created on first use and then holds every entry
    /// declared with [`export!`](crate::export). Factories of exported entries
    /// run during that first use and must not touch the global registry
    /// themselves.
    pub fn global() -> &'static SelectionRegistry {
        &GLOBAL
    }

    fn from_exports() -> Self {
        let registry = Self::new();
        for entry in EXPORTS {
            let registration = entry.registration();
            let type_key = registration.type_key();
            if registry.define(registration, entry.key()) {
                debug!(%type_key, option = entry.key(), "exported option registered");
            } else {
                debug!(%type_key, option = entry.key(), "duplicated exported option ignored");
            }
        }
        registry
    }

    /// Stores `registration` under `key` in the cluster of its type.
    ///
    /// Returns false and changes nothing if the type already has an option
    /// with this key.
    pub fn define(&self, registration: Arc<dyn Registration>, key: impl Into<String>) -> bool {
        self.clusters.lock().insert(key.into(), registration)
    }

    /// Stores `registration` under `key`. See [`SelectionRegistry::define`].
    pub fn set<R>(&self, key: impl Into<String>, registration: R) -> bool
    where
        R: Registration,
    {
        self.define(Arc::new(registration), key)
    }

    pub fn resolve(&self, type_key: TypeKey, key: &str) -> Option<Arc<dyn Registration>> {
        self.clusters.lock().get(type_key, key).map(Arc::clone)
    }

    /// Returns the provider of `T` stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the registration stored for `T` is not a [`Provider<T>`],
    /// which only happens if a custom [`Registration`] reports a type key it
    /// can't serve.
    pub fn get<T>(&self, key: &str) -> Option<Arc<Provider<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let registration = self.resolve(TypeKey::of::<T>(), key)?;
        match registration.downcast::<Provider<T>>() {
            Ok(provider) => Some(provider),
            Err(registration) => unreachable!(
                "the option {key} of {} should be a provider, not {registration:?}",
                TypeKey::of::<T>(),
            ),
        }
    }

    /// Installs the option `key` of the type `type_key` into `scope`.
    ///
    /// Returns false without touching `scope` if there's no such option or
    /// `scope` already defines the type.
    pub fn install(&self, scope: &Scope, type_key: TypeKey, key: &str) -> bool {
        let Some(registration) = self.resolve(type_key, key) else {
            debug!(%type_key, option = key, "no such option to install");
            return false;
        };
        let installed = scope.define(registration);
        trace!(%type_key, option = key, installed, "option installed into scope");
        installed
    }

    /// Installs the option `key` of `T` into `scope`. See
    /// [`SelectionRegistry::install`].
    pub fn select<T>(&self, scope: &Scope, key: &str) -> bool
    where
        T: ?Sized + 'static,
    {
        self.install(scope, TypeKey::of::<T>(), key)
    }

    /// Installs the option `key` of `T` into `scope`, reporting why it was
    /// not possible.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::UnknownOption`] if `T` has no option `key`, or
    /// [`SelectError::AlreadyDefined`] if `scope` already defines `T`.
    pub fn try_select<T>(&self, scope: &Scope, key: &str) -> Result<(), SelectError>
    where
        T: ?Sized + 'static,
    {
        let type_key = TypeKey::of::<T>();
        let registration = self
            .resolve(type_key, key)
            .with_context(|| UnknownOptionSnafu {
                type_key,
                key,
                available: self.keys_of(type_key),
            })?;
        ensure!(scope.define(registration), AlreadyDefinedSnafu { type_key });
        Ok(())
    }

    /// Returns the option keys available for `T` in lexical order.
    pub fn keys<T>(&self) -> Vec<String>
    where
        T: ?Sized + 'static,
    {
        self.keys_of(TypeKey::of::<T>())
    }

    pub fn keys_of(&self, type_key: TypeKey) -> Vec<String> {
        self.clusters.lock().keys(type_key)
    }
}

impl Default for SelectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SelectionRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SelectionRegistry").finish_non_exhaustive()
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SelectError {
    #[snafu(display(
        "unknown option {key} for {type_key}, available options: {}",
        OptionsDisplayer::new(available)
    ))]
    #[non_exhaustive]
    UnknownOption {
        type_key: TypeKey,
        key: String,
        available: Vec<String>,
    },
    #[snafu(display("the scope already defines {type_key}"))]
    #[non_exhaustive]
    AlreadyDefined { type_key: TypeKey },
}

struct OptionsDisplayer<'a> {
    options: &'a [String],
}

impl<'a> OptionsDisplayer<'a> {
    fn new(options: &'a [String]) -> Self {
        Self { options }
    }
}

impl Display for OptionsDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.options.is_empty() {
            return f.write_str("none");
        }
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(option)?;
        }
        Ok(())
    }
}
