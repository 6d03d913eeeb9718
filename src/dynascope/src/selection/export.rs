use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use linkme::distributed_slice;

use crate::registration::Registration;
use crate::selection::SelectionRegistry;

/// Options declared with [`export!`](crate::export), collected at link time.
///
/// The global [`SelectionRegistry`] defines every entry when it is first
/// used. Prefer the macro over submitting entries by hand.
#[distributed_slice]
pub static EXPORTS: [ExportEntry] = [..];

/// A link-time option: a key and a function building its registration.
pub struct ExportEntry {
    key: &'static str,
    registration: fn() -> Arc<dyn Registration>,
}

impl ExportEntry {
    pub const fn new(key: &'static str, registration: fn() -> Arc<dyn Registration>) -> Self {
        Self { key, registration }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn registration(&self) -> Arc<dyn Registration> {
        (self.registration)()
    }
}

impl Debug for ExportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExportEntry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Defines an option as a side effect of construction.
///
/// Useful where code runs once per module, e.g. in a plugin's init function.
/// For options that must be present before any code runs, use
/// [`export!`](crate::export) instead.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dynascope::prelude::*;
/// struct Backend(&'static str);
///
/// let options = SelectionRegistry::new();
/// let backend = Provider::fixed(Arc::new(Backend("mem")));
/// let export = Export::with_registry(backend, "mem", &options);
/// assert!(export.is_valid());
/// assert!(options.get::<Backend>("mem").is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Export {
    valid: bool,
}

impl Export {
    /// Defines `registration` under `key` in the global registry.
    pub fn new<R>(registration: R, key: impl Into<String>) -> Self
    where
        R: Registration,
    {
        Self::with_registry(registration, key, SelectionRegistry::global())
    }

    /// Defines `registration` under `key` in `registry`.
    pub fn with_registry<R>(
        registration: R,
        key: impl Into<String>,
        registry: &SelectionRegistry,
    ) -> Self
    where
        R: Registration,
    {
        Self {
            valid: registry.set(key, registration),
        }
    }

    /// Returns true if the option was defined, false if the key was already
    /// taken for this type.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Declares an option of the global [`SelectionRegistry`] at link time.
///
/// The entry is defined into [`SelectionRegistry::global`] the first time the
/// registry is used, so it is visible before any setup code runs. The
/// registration expression is evaluated at that moment, once.
///
/// If several entries claim the same key for one type, only one of them is
/// kept and which one is unspecified.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// # use dynascope::prelude::*;
/// pub struct Backend(&'static str);
///
/// dynascope::export!(MEMORY_BACKEND, "memory", Provider::fixed(Arc::new(Backend("memory"))));
///
/// fn main() {
///     let scope = Scope::new();
///     assert!(SelectionRegistry::global().select::<Backend>(&scope, "memory"));
///     assert_eq!(scope.get::<Backend>().unwrap().0, "memory");
/// }
/// ```
#[macro_export]
macro_rules! export {
    ($name:ident, $key:expr, $registration:expr $(,)?) => {
        #[$crate::__private::linkme::distributed_slice($crate::selection::EXPORTS)]
        #[linkme(crate = $crate::__private::linkme)]
        static $name: $crate::selection::ExportEntry = $crate::selection::ExportEntry::new(
            $key,
            || -> ::std::sync::Arc<dyn $crate::registration::Registration> {
                ::std::sync::Arc::new($registration)
            },
        );
    };
}
