//! Type-name registry.
//!
//! Maps the type names found in settings to [`ObjectType`] tags so objects can
//! be created generically by name. Resolution never fails: a miss yields
//! [`ObjectType::Unknown`].

use std::collections::HashMap;

use tracing::debug;

use crate::object::ObjectType;

/// Name to type-tag mapping.
///
/// # Example
///
/// ```
/// use wingbrawl_core::object::ObjectType;
/// use wingbrawl_core::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register("crow", ObjectType::Crow);
///
/// assert_eq!(registry.resolve("crow"), ObjectType::Crow);
/// assert_eq!(registry.resolve("dragon"), ObjectType::Unknown);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, ObjectType>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the conventional name of every real kind.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in ObjectType::ALL {
            registry.register(kind.default_name(), kind);
        }
        registry
    }

    /// Associates `name` with `kind`, replacing any earlier association.
    pub fn register(&mut self, name: impl Into<String>, kind: ObjectType) {
        let name = name.into();
        if let Some(previous) = self.types.insert(name.clone(), kind) {
            if previous != kind {
                debug!(%name, %previous, %kind, "type name re-registered");
            }
        }
    }

    /// Resolves `name`, returning [`ObjectType::Unknown`] if it is not registered.
    #[must_use]
    pub fn resolve(&self, name: &str) -> ObjectType {
        self.get(name).unwrap_or(ObjectType::Unknown)
    }

    /// Resolves `name`, returning `None` if it is not registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ObjectType> {
        self.types.get(name).copied()
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ObjectType)> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = (S, ObjectType)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, kind) in iter {
            registry.register(name, kind);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_resolves_unknown() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("plane"), ObjectType::Unknown);
        assert_eq!(registry.get("plane"), None);
    }

    #[test]
    fn defaults_cover_every_real_kind() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(registry.len(), ObjectType::ALL.len());
        for kind in ObjectType::ALL {
            assert_eq!(registry.resolve(kind.default_name()), kind);
        }
    }

    #[test]
    fn duplicate_registration_overwrites() {
        let mut registry = TypeRegistry::new();
        registry.register("thing", ObjectType::Crow);
        registry.register("thing", ObjectType::Bullet);
        assert_eq!(registry.resolve("thing"), ObjectType::Bullet);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn several_names_can_share_a_kind() {
        let registry: TypeRegistry = [("raven", ObjectType::Crow), ("crow", ObjectType::Crow)]
            .into_iter()
            .collect();
        assert_eq!(registry.resolve("raven"), ObjectType::Crow);
        assert_eq!(registry.resolve("crow"), ObjectType::Crow);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(registry.resolve("Crow"), ObjectType::Unknown);
    }
}
