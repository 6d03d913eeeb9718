use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::key::TypeKey;
use crate::registration::Registration;

/// Registrations grouped by the type they describe, then by option key.
#[derive(Debug, Default)]
pub struct ClusterMap {
    clusters: HashMap<TypeKey, Cluster>,
}

impl ClusterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `registration` under `key` unless the pair is taken. Returns
    /// whether the registration was inserted.
    pub fn insert(&mut self, key: String, registration: Arc<dyn Registration>) -> bool {
        self.clusters
            .entry(registration.type_key())
            .or_default()
            .insert(key, registration)
    }

    pub fn get(&self, type_key: TypeKey, key: &str) -> Option<&Arc<dyn Registration>> {
        self.clusters
            .get(&type_key)
            .and_then(|cluster| cluster.get(key))
    }

    /// Returns the option keys of `type_key` in lexical order.
    pub fn keys(&self, type_key: TypeKey) -> Vec<String> {
        let mut keys: Vec<String> = self
            .clusters
            .get(&type_key)
            .map(|cluster| cluster.definitions.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}

#[derive(Debug, Default)]
struct Cluster {
    definitions: HashMap<String, Arc<dyn Registration>>,
}

impl Cluster {
    fn insert(&mut self, key: String, registration: Arc<dyn Registration>) -> bool {
        match self.definitions.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(registration);
                true
            }
        }
    }

    fn get(&self, key: &str) -> Option<&Arc<dyn Registration>> {
        self.definitions.get(key)
    }
}
