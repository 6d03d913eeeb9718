use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::key::TypeKey;
use crate::registration::Registration;

pub struct ScopeCore {
    parent: Option<Arc<Self>>,
    entries: Mutex<HashMap<TypeKey, Arc<dyn Registration>>>,
}

impl ScopeCore {
    pub fn new_root() -> Self {
        Self::new_impl(None)
    }

    pub fn new_sub(parent: Arc<Self>) -> Self {
        Self::new_impl(Some(parent))
    }

    fn new_impl(parent: Option<Arc<Self>>) -> Self {
        Self {
            parent,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn define(&self, registration: Arc<dyn Registration>) -> bool {
        let key = registration.type_key();
        let mut entries = self.entries.lock();

        match entries.entry(key) {
            Entry::Occupied(_) => {
                drop(entries);
                debug!(%key, "refused to redefine a registration in the same scope");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(registration);
                drop(entries);
                trace!(%key, "registration defined");
                true
            }
        }
    }

    pub fn resolve(&self, key: TypeKey) -> Option<Arc<dyn Registration>> {
        // Only one node is locked at a time; a parent link never changes, so
        // walking upwards needs no further coordination.
        let found = std::iter::once(self)
            .chain(self.ancestors())
            .find_map(|core| core.try_get_local(key));
        if found.is_none() {
            trace!(%key, "no registration along the scope chain");
        }
        found
    }

    pub fn is_defined_locally(&self, key: TypeKey) -> bool {
        self.entries.lock().contains_key(&key)
    }

    fn try_get_local(&self, key: TypeKey) -> Option<Arc<dyn Registration>> {
        self.entries.lock().get(&key).map(Arc::clone)
    }

    fn ancestors(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(self.parent.as_deref(), |core| core.parent.as_deref())
    }
}

impl Drop for ScopeCore {
    fn drop(&mut self) {
        // Unlink the chain iteratively so long chains don't overflow the stack
        // by recursing once per level.
        let mut parent = self.parent.take();
        while let Some(core) = parent {
            parent = match Arc::into_inner(core) {
                Some(mut core) => core.parent.take(),
                None => break,
            };
        }
    }
}
