use std::fmt::Debug;

use crate::key::TypeKey;
use crate::util::any::AsAny;

/// A type-erased record describing how to obtain objects of one type.
///
/// Registrations are the unit stored by a [`Scope`] and a
/// [`SelectionRegistry`]. Once published they are never mutated, so a single
/// registration is shared as `Arc<dyn Registration>` by every container that
/// holds it and may be used from any thread.
///
/// At this level a registration only reports the type it stands for. The
/// ability to actually produce objects is the typed capability offered by
/// [`Provider`], which callers recover through a checked downcast. Custom
/// implementations may be stored too, but they are never mistaken for a
/// provider.
///
/// [`Scope`]: crate::scope::Scope
/// [`SelectionRegistry`]: crate::selection::SelectionRegistry
/// [`Provider`]: crate::provider::Provider
#[cfg_attr(test, mockall::automock)]
pub trait Registration: AsAny + Debug + Send + Sync + 'static {
    /// Returns the key of the type this registration describes.
    fn type_key(&self) -> TypeKey;
}
