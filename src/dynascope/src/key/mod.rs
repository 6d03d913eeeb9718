use std::any::{self, TypeId};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

/// A process-unique identity of a type, used to index registrations.
///
/// Two [`TypeKey`]s are equal exactly when they were created for the same
/// type. The type name is kept only for diagnostics and never takes part in
/// comparison or hashing.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key of `T`. `T` may be unsized, e.g. `dyn Trait`.
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TypeKey({})", self.name)
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    trait Greeter {}

    #[test]
    fn type_key_eq_succeeds() {
        assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<i64>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<Arc<i32>>());
        assert_eq!(TypeKey::of::<dyn Greeter>(), TypeKey::of::<dyn Greeter>());
        assert_ne!(TypeKey::of::<str>(), TypeKey::of::<String>());
    }

    #[test]
    fn type_key_hash_succeeds() {
        let keys: HashSet<TypeKey> = [
            TypeKey::of::<i32>(),
            TypeKey::of::<i32>(),
            TypeKey::of::<&'static str>(),
        ]
        .into_iter()
        .collect();

        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&TypeKey::of::<i32>()));
        assert!(!keys.contains(&TypeKey::of::<u8>()));
    }

    #[test]
    fn type_key_ord_agrees_with_eq() {
        let a = TypeKey::of::<i32>();
        let b = TypeKey::of::<u64>();

        assert_eq!(a.cmp(&a), Ordering::Equal);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn type_key_display_succeeds() {
        assert_eq!(TypeKey::of::<i32>().to_string(), "i32");
        assert_eq!(format!("{:?}", TypeKey::of::<u8>()), "TypeKey(u8)");
        assert_eq!(TypeKey::of::<String>().name(), any::type_name::<String>());
    }
}
